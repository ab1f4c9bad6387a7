use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::status::OrderStatus;
use crate::errors::ServiceError;

pub const INVALID_ORDER_MSG: &str = "All fields are required and must be valid";

/// Stored order. Only `status` changes after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub user_id: i64,
    pub product: String,
    pub quantity: i64,
    pub price: f64,
    pub status: OrderStatus,
    pub created: DateTime<Utc>,
}

/// Caller-supplied fields for a new order; id, status and timestamp are assigned by the store.
/// Missing fields decode as zero/empty and are then rejected by [`NewOrder::validate`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewOrder {
    pub user_id: i64,
    pub product: String,
    pub quantity: i64,
    pub price: f64,
}

impl NewOrder {
    pub fn validate(&self) -> Result<(), ServiceError> {
        let price_ok = self.price.is_finite() && self.price > 0.0;
        if self.user_id <= 0 || self.product.is_empty() || self.quantity <= 0 || !price_ok {
            return Err(ServiceError::validation(INVALID_ORDER_MSG));
        }
        Ok(())
    }

    pub(crate) fn into_order(self, id: i64, created: DateTime<Utc>) -> Order {
        Order {
            id,
            user_id: self.user_id,
            product: self.product,
            quantity: self.quantity,
            price: self.price,
            status: OrderStatus::Pending,
            created,
        }
    }
}

/// User display data attached to an order read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserSummary {
    #[serde(rename = "user_name")]
    pub name: String,
    #[serde(rename = "user_email")]
    pub email: String,
}

/// An order plus user details when the user registry could supply them.
/// Without them the wire form is exactly the bare order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedOrder {
    #[serde(flatten)]
    pub order: Order,
    #[serde(flatten)]
    pub user: Option<UserSummary>,
}

impl EnrichedOrder {
    pub fn bare(order: Order) -> Self {
        Self { order, user: None }
    }
}
