use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, instrument, warn};

use super::{Enrichment, EnrichmentError, UserLookup, UserProfile};

/// `GET {base_url}/users/{id}` with a client-side timeout.
#[derive(Clone)]
pub struct HttpUserLookup {
    client: reqwest::Client,
    base_url: String,
}

impl HttpUserLookup {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, EnrichmentError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| EnrichmentError::Transport(e.to_string()))?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Single remote attempt, classified into the three failure kinds.
    pub async fn fetch(&self, user_id: i64) -> Result<UserProfile, EnrichmentError> {
        let url = format!("{}/users/{}", self.base_url, user_id);
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| EnrichmentError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(EnrichmentError::Status(status.as_u16()));
        }

        resp.json::<UserProfile>().await.map_err(|e| {
            if e.is_decode() {
                EnrichmentError::Decode(e.to_string())
            } else {
                EnrichmentError::Transport(e.to_string())
            }
        })
    }
}

#[async_trait]
impl UserLookup for HttpUserLookup {
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn lookup(&self, user_id: i64) -> Enrichment {
        match self.fetch(user_id).await {
            Ok(profile) => {
                debug!(user_id, "user_enriched");
                Enrichment::Enriched(profile)
            }
            Err(e) => {
                warn!(user_id, error = %e, "user lookup degraded");
                e.degrade(user_id)
            }
        }
    }
}
