use std::time::Duration;

use anyhow::{anyhow, Result};
use serde::Deserialize;

pub const DEFAULT_USER_SERVICE_PORT: u16 = 8080;
pub const DEFAULT_ORDER_SERVICE_PORT: u16 = 8081;

/// Which registry a process is hosting; picks the bind section and env overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceKind {
    Users,
    Orders,
}

impl ServiceKind {
    pub fn name(self) -> &'static str {
        match self {
            ServiceKind::Users => "user-service",
            ServiceKind::Orders => "order-service",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "ServerConfig::user_default")]
    pub user_service: ServerConfig,
    #[serde(default = "ServerConfig::order_default")]
    pub order_service: ServerConfig,
    #[serde(default)]
    pub enrichment: EnrichmentConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            user_service: ServerConfig::user_default(),
            order_service: ServerConfig::order_default(),
            enrichment: EnrichmentConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl ServerConfig {
    fn user_default() -> Self {
        Self { host: default_host(), port: DEFAULT_USER_SERVICE_PORT, worker_threads: None }
    }

    fn order_default() -> Self {
        Self { host: default_host(), port: DEFAULT_ORDER_SERVICE_PORT, worker_threads: None }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// How the order registry reaches the user registry.
#[derive(Debug, Clone, Deserialize)]
pub struct EnrichmentConfig {
    #[serde(default = "default_user_service_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self { base_url: default_user_service_url(), timeout_secs: default_timeout_secs() }
    }
}

impl EnrichmentConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_host() -> String { "0.0.0.0".into() }
fn default_user_service_url() -> String { "http://user-service:8080".into() }
fn default_timeout_secs() -> u64 { 5 }

fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// File config if present, otherwise defaults; then process env overrides for `kind`.
    /// A config file that exists but does not parse is an error.
    pub fn load_and_validate(kind: ServiceKind) -> Result<Self> {
        let path = config_path();
        let mut cfg = if std::path::Path::new(&path).exists() {
            load_from_file(&path)?
        } else {
            AppConfig::default()
        };
        cfg.apply_env(kind, |key| std::env::var(key).ok());
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn server(&self, kind: ServiceKind) -> &ServerConfig {
        match kind {
            ServiceKind::Users => &self.user_service,
            ServiceKind::Orders => &self.order_service,
        }
    }

    /// `SERVER_HOST`/`SERVER_PORT` target the section of the hosting service.
    pub fn apply_env<F>(&mut self, kind: ServiceKind, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let server = match kind {
            ServiceKind::Users => &mut self.user_service,
            ServiceKind::Orders => &mut self.order_service,
        };
        if let Some(host) = lookup("SERVER_HOST") {
            server.host = host;
        }
        if let Some(port) = lookup("SERVER_PORT").and_then(|p| p.parse::<u16>().ok()) {
            server.port = port;
        }
        if let Some(w) = lookup("TOKIO_WORKER_THREADS").and_then(|v| v.parse::<usize>().ok()) {
            server.worker_threads = Some(w);
        }
        if let Some(url) = lookup("USER_SERVICE_URL") {
            self.enrichment.base_url = url;
        }
        if let Some(t) = lookup("USER_SERVICE_TIMEOUT_SECS").and_then(|v| v.parse::<u64>().ok()) {
            self.enrichment.timeout_secs = t;
        }
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.user_service.normalize()?;
        self.order_service.normalize()?;
        self.enrichment.normalize()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = default_host();
        }
        if self.port == 0 {
            return Err(anyhow!("server port must be in 1..=65535"));
        }
        if self.worker_threads == Some(0) {
            self.worker_threads = None;
        }
        Ok(())
    }
}

impl EnrichmentConfig {
    fn normalize(&mut self) -> Result<()> {
        let trimmed = self.base_url.trim().trim_end_matches('/');
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(anyhow!("enrichment.base_url must start with http:// or https://"));
        }
        self.base_url = trimmed.to_string();
        if self.timeout_secs == 0 {
            return Err(anyhow!("enrichment.timeout_secs must be a positive number of seconds"));
        }
        Ok(())
    }
}
