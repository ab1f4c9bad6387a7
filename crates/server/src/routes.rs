pub mod orders;
pub mod users;

use std::sync::Arc;

use axum::{
    extract::FromRef,
    middleware,
    routing::{get, put},
    Json, Router,
};
use common::types::Health;
use service::{orders::OrderService, users::UserRepository};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::metrics::{metrics_handler, track_metrics, SharedMetrics};

pub const ORDER_SERVICE: &str = "order-service";
pub const USER_SERVICE: &str = "user-service";

/// Shared state of the order registry.
#[derive(Clone)]
pub struct OrderState {
    pub orders: OrderService,
    pub metrics: SharedMetrics,
}

/// Shared state of the user registry.
#[derive(Clone)]
pub struct UserState {
    pub users: Arc<UserRepository>,
    pub metrics: SharedMetrics,
}

impl FromRef<OrderState> for SharedMetrics {
    fn from_ref(state: &OrderState) -> Self {
        Arc::clone(&state.metrics)
    }
}

impl FromRef<UserState> for SharedMetrics {
    fn from_ref(state: &UserState) -> Self {
        Arc::clone(&state.metrics)
    }
}

pub fn build_cors() -> CorsLayer {
    CorsLayer::permissive()
}

/// Order registry: `/health`, `/orders`, `/orders/:id`, `/orders/:id/status`, `/metrics`.
pub fn build_order_router(state: OrderState, cors: CorsLayer) -> Router {
    let metrics = Arc::clone(&state.metrics);
    let router = Router::new()
        .route("/health", get(|| async { Json(Health::healthy(ORDER_SERVICE)) }))
        .route("/orders", get(orders::list_orders).post(orders::create_order))
        .route("/orders/:id", get(orders::get_order))
        .route("/orders/:id/status", put(orders::update_order_status))
        .route("/metrics", get(metrics_handler))
        .route_layer(middleware::from_fn_with_state(metrics, track_metrics))
        .with_state(state);
    with_common_layers(router, cors)
}

/// User registry: `/health`, `/users`, `/users/:id`, `/metrics`.
pub fn build_user_router(state: UserState, cors: CorsLayer) -> Router {
    let metrics = Arc::clone(&state.metrics);
    let router = Router::new()
        .route("/health", get(|| async { Json(Health::healthy(USER_SERVICE)) }))
        .route("/users", get(users::list_users).post(users::create_user))
        .route("/users/:id", get(users::get_user))
        .route("/metrics", get(metrics_handler))
        .route_layer(middleware::from_fn_with_state(metrics, track_metrics))
        .with_state(state);
    with_common_layers(router, cors)
}

fn with_common_layers(router: Router, cors: CorsLayer) -> Router {
    router.layer(cors).layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
            .on_request(DefaultOnRequest::new().level(Level::DEBUG))
            .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
            .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
    )
}
