use axum::{
    extract::{rejection::JsonRejection, rejection::PathRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use service::orders::{EnrichedOrder, NewOrder, Order, OrderStatus};

use super::OrderState;
use crate::errors::ApiError;

#[derive(Debug, Deserialize)]
pub struct ListOrdersQuery {
    pub user_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct StatusUpdate {
    pub status: String,
}

fn order_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, ApiError> {
    path.map(|Path(id)| id).map_err(|_| ApiError::bad_request("Invalid order ID"))
}

/// `GET /orders[?user_id=N]`
pub async fn list_orders(
    State(state): State<OrderState>,
    Query(q): Query<ListOrdersQuery>,
) -> Result<Json<Vec<Order>>, ApiError> {
    let repo = state.orders.repository();
    let orders = match q.user_id.as_deref() {
        Some(raw) if !raw.is_empty() => {
            let user_id = raw.parse::<i64>().map_err(|_| ApiError::bad_request("Invalid user ID"))?;
            repo.list_by_user(user_id).await
        }
        _ => repo.list_all().await,
    };
    Ok(Json(orders))
}

/// `GET /orders/:id` with user details when available.
pub async fn get_order(
    State(state): State<OrderState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<EnrichedOrder>, ApiError> {
    let id = order_id(path)?;
    state
        .orders
        .get_enriched(id)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Order not found"))
}

/// `POST /orders`
pub async fn create_order(
    State(state): State<OrderState>,
    payload: Result<Json<NewOrder>, JsonRejection>,
) -> Result<(StatusCode, Json<Order>), ApiError> {
    let Json(input) = payload.map_err(|_| ApiError::invalid_json())?;
    let order = state.orders.repository().create(input).await?;
    state.metrics.record_order_status(order.status.as_str());
    Ok((StatusCode::CREATED, Json(order)))
}

/// `PUT /orders/:id/status`
pub async fn update_order_status(
    State(state): State<OrderState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<StatusUpdate>, JsonRejection>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let id = order_id(path)?;
    let Json(body) = payload.map_err(|_| ApiError::invalid_json())?;
    let status: OrderStatus = state.orders.repository().transition(id, &body.status).await?;
    state.metrics.record_order_status(status.as_str());
    Ok(Json(serde_json::json!({"status": "updated"})))
}
