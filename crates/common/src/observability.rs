//! Request and domain metrics.
//!
//! Handlers receive a [`MetricsRecorder`] instead of touching process-wide
//! counters, so tests can swap in [`NoopRecorder`] and every service instance
//! owns its own Prometheus registry.

use axum::http::StatusCode;
use prometheus::{Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("metric registration failed: {0}")]
    Register(#[from] prometheus::Error),
}

/// Sink for request and order metrics.
pub trait MetricsRecorder: Send + Sync {
    fn record_request(&self, method: &str, endpoint: &str, status: u16);
    fn observe_duration(&self, method: &str, endpoint: &str, seconds: f64);
    fn record_order_status(&self, status: &str);
    /// Render the current state for a `/metrics` scrape.
    fn render(&self) -> (StatusCode, String);
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopRecorder;

impl MetricsRecorder for NoopRecorder {
    fn record_request(&self, _method: &str, _endpoint: &str, _status: u16) {}
    fn observe_duration(&self, _method: &str, _endpoint: &str, _seconds: f64) {}
    fn record_order_status(&self, _status: &str) {}
    fn render(&self) -> (StatusCode, String) {
        (StatusCode::OK, String::new())
    }
}

/// Prometheus-backed recorder with a private registry.
pub struct PrometheusRecorder {
    registry: Registry,
    requests_total: IntCounterVec,
    request_duration: HistogramVec,
    orders_total: IntCounterVec,
}

impl PrometheusRecorder {
    pub fn new() -> Result<Self, MetricsError> {
        let registry = Registry::new();

        let requests_total = IntCounterVec::new(
            Opts::new("http_requests_total", "Total number of HTTP requests"),
            &["method", "endpoint", "status"],
        )?;
        let request_duration = HistogramVec::new(
            HistogramOpts::new("http_request_duration_seconds", "Duration of HTTP requests")
                .buckets(vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]),
            &["method", "endpoint"],
        )?;
        let orders_total = IntCounterVec::new(
            Opts::new("orders_total", "Total number of orders created"),
            &["status"],
        )?;

        registry.register(Box::new(requests_total.clone()))?;
        registry.register(Box::new(request_duration.clone()))?;
        registry.register(Box::new(orders_total.clone()))?;

        Ok(Self { registry, requests_total, request_duration, orders_total })
    }
}

impl MetricsRecorder for PrometheusRecorder {
    fn record_request(&self, method: &str, endpoint: &str, status: u16) {
        self.requests_total
            .with_label_values(&[method, endpoint, &status.to_string()])
            .inc();
    }

    fn observe_duration(&self, method: &str, endpoint: &str, seconds: f64) {
        self.request_duration.with_label_values(&[method, endpoint]).observe(seconds);
    }

    fn record_order_status(&self, status: &str) {
        self.orders_total.with_label_values(&[status]).inc();
    }

    fn render(&self) -> (StatusCode, String) {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
            return (StatusCode::INTERNAL_SERVER_ERROR, format!("metrics encode error: {e}"));
        }
        (StatusCode::OK, String::from_utf8(buffer).unwrap_or_default())
    }
}
