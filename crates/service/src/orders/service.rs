use std::sync::Arc;

use tracing::{debug, instrument};

use super::domain::{EnrichedOrder, UserSummary};
use super::repository::OrderRepository;
use crate::enrichment::UserLookup;

/// Order reads that pull user details from the user registry.
#[derive(Clone)]
pub struct OrderService {
    repo: Arc<OrderRepository>,
    users: Arc<dyn UserLookup>,
}

impl OrderService {
    pub fn new(repo: Arc<OrderRepository>, users: Arc<dyn UserLookup>) -> Self {
        Self { repo, users }
    }

    pub fn repository(&self) -> &Arc<OrderRepository> {
        &self.repo
    }

    /// `None` only when the order does not exist. The store lock is released
    /// before the remote lookup starts; a failed lookup yields the bare order.
    #[instrument(skip(self))]
    pub async fn get_enriched(&self, order_id: i64) -> Option<EnrichedOrder> {
        let order = self.repo.get(order_id).await?;
        let user = match self.users.lookup(order.user_id).await.into_profile() {
            Some(profile) => Some(UserSummary { name: profile.name, email: profile.email }),
            None => {
                debug!(order_id, user_id = order.user_id, "returning order without user details");
                None
            }
        };
        Some(EnrichedOrder { order, user })
    }
}
