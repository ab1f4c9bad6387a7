use tracing::info;

use super::domain::{NewUser, User};
use crate::errors::ServiceError;
use crate::storage::ResourceStore;

/// User storage on top of [`ResourceStore`].
pub struct UserRepository {
    store: ResourceStore<User>,
}

impl Default for UserRepository {
    fn default() -> Self {
        Self::with_fixtures()
    }
}

impl UserRepository {
    pub fn empty() -> Self {
        Self { store: ResourceStore::new() }
    }

    /// Repository seeded with two sample users (ids 1 and 2).
    pub fn with_fixtures() -> Self {
        let mut store = ResourceStore::new();
        let fixtures = [
            NewUser { name: "John Doe".into(), email: "john@example.com".into() },
            NewUser { name: "Jane Smith".into(), email: "jane@example.com".into() },
        ];
        for fixture in fixtures {
            store.seed(|id, created| fixture.into_user(id, created));
        }
        Self { store }
    }

    pub async fn create(&self, input: NewUser) -> Result<User, ServiceError> {
        input.validate()?;
        let user = self.store.create(|id, created| input.into_user(id, created)).await;
        info!(user_id = user.id, "user_created");
        Ok(user)
    }

    pub async fn get(&self, id: i64) -> Option<User> {
        self.store.get_by_id(id).await
    }

    pub async fn list_all(&self) -> Vec<User> {
        self.store.list_all().await
    }

    pub async fn next_id(&self) -> i64 {
        self.store.next_id().await
    }
}
