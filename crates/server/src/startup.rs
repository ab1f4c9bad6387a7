use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use common::observability::{MetricsRecorder, PrometheusRecorder};
use configs::{AppConfig, ServiceKind};
use service::{
    enrichment::HttpUserLookup,
    orders::{OrderRepository, OrderService},
    users::UserRepository,
};
use tracing::info;

use crate::metrics::SharedMetrics;
use crate::routes::{self, OrderState, UserState};

fn prometheus() -> anyhow::Result<SharedMetrics> {
    Ok(Arc::new(PrometheusRecorder::new()?))
}

/// Order registry app: seeded store, HTTP user lookup, Prometheus metrics.
/// Seeded orders count towards `orders_total` like any other created order.
pub async fn order_app(cfg: &AppConfig) -> anyhow::Result<Router> {
    let lookup = HttpUserLookup::new(cfg.enrichment.base_url.clone(), cfg.enrichment.timeout())?;
    info!(user_service = %lookup.base_url(), timeout_secs = cfg.enrichment.timeout_secs, "user lookup configured");
    let repo = Arc::new(OrderRepository::with_fixtures());
    let metrics = prometheus()?;
    for order in repo.list_all().await {
        metrics.record_order_status(order.status.as_str());
    }
    let orders = OrderService::new(repo, Arc::new(lookup));
    let state = OrderState { orders, metrics };
    Ok(routes::build_order_router(state, routes::build_cors()))
}

/// User registry app: seeded store and Prometheus metrics.
pub fn user_app() -> anyhow::Result<Router> {
    let state = UserState { users: Arc::new(UserRepository::with_fixtures()), metrics: prometheus()? };
    Ok(routes::build_user_router(state, routes::build_cors()))
}

async fn serve(kind: ServiceKind, cfg: &AppConfig, app: Router) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(cfg.server(kind).bind_addr()).await?;
    let addr: SocketAddr = listener.local_addr()?;
    info!(service = kind.name(), %addr, "listening");
    info!(service = kind.name(), "health check: http://{}/health, metrics: http://{}/metrics", addr, addr);
    axum::serve(listener, app).await?;
    Ok(())
}

pub async fn run_order_service(cfg: AppConfig) -> anyhow::Result<()> {
    let app = order_app(&cfg).await?;
    serve(ServiceKind::Orders, &cfg, app).await
}

pub async fn run_user_service(cfg: AppConfig) -> anyhow::Result<()> {
    let app = user_app()?;
    serve(ServiceKind::Users, &cfg, app).await
}
