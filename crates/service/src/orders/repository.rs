use tracing::{debug, info};

use super::domain::{NewOrder, Order};
use super::status::OrderStatus;
use crate::errors::ServiceError;
use crate::storage::ResourceStore;

/// Order storage on top of [`ResourceStore`].
pub struct OrderRepository {
    store: ResourceStore<Order>,
}

impl Default for OrderRepository {
    fn default() -> Self {
        Self::with_fixtures()
    }
}

impl OrderRepository {
    /// Repository seeded with the two sample orders (ids 1 and 2).
    pub fn with_fixtures() -> Self {
        let mut store = ResourceStore::new();
        let fixtures = [
            NewOrder { user_id: 1, product: "Laptop".into(), quantity: 1, price: 999.99 },
            NewOrder { user_id: 2, product: "Mouse".into(), quantity: 2, price: 25.00 },
        ];
        for fixture in fixtures {
            store.seed(|id, created| fixture.into_order(id, created));
        }
        Self { store }
    }

    /// Validate and store a new `pending` order. Invalid input never reaches the store.
    pub async fn create(&self, input: NewOrder) -> Result<Order, ServiceError> {
        input.validate()?;
        let order = self.store.create(|id, created| input.into_order(id, created)).await;
        info!(order_id = order.id, user_id = order.user_id, product = %order.product, "order_created");
        Ok(order)
    }

    pub async fn get(&self, id: i64) -> Option<Order> {
        self.store.get_by_id(id).await
    }

    pub async fn list_all(&self) -> Vec<Order> {
        self.store.list_all().await
    }

    pub async fn list_by_user(&self, user_id: i64) -> Vec<Order> {
        self.store.list_by_filter(|o| o.user_id == user_id).await
    }

    /// Set the status of an existing order; `false` if the id is unknown.
    pub async fn update_status(&self, id: i64, status: OrderStatus) -> bool {
        let updated = self.store.update(id, |o| o.status = status).await;
        debug!(order_id = id, %status, updated, "order_status_update");
        updated
    }

    /// Validate a raw status string, then apply it. Validation runs first, so an
    /// invalid status is reported even for an unknown id.
    pub async fn transition(&self, id: i64, candidate: &str) -> Result<OrderStatus, ServiceError> {
        let status: OrderStatus = candidate.parse()?;
        if !self.update_status(id, status).await {
            return Err(ServiceError::not_found("Order"));
        }
        info!(order_id = id, %status, "order_status_changed");
        Ok(status)
    }

    pub async fn next_id(&self) -> i64 {
        self.store.next_id().await
    }

    pub async fn count(&self) -> usize {
        self.store.len().await
    }
}
