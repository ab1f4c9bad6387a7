use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use common::observability::MetricsRecorder;

pub type SharedMetrics = Arc<dyn MetricsRecorder>;

/// Route-layer middleware: counts every response and observes its latency,
/// labelled with the matched route template (e.g. `/orders/:id`).
pub async fn track_metrics(
    State(metrics): State<SharedMetrics>,
    req: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = req.method().to_string();
    let endpoint = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());

    let resp = next.run(req).await;

    metrics.observe_duration(&method, &endpoint, start.elapsed().as_secs_f64());
    metrics.record_request(&method, &endpoint, resp.status().as_u16());
    resp
}

/// `/metrics` scrape handler.
pub async fn metrics_handler(State(metrics): State<SharedMetrics>) -> (StatusCode, String) {
    metrics.render()
}
