use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;

pub const INVALID_USER_MSG: &str = "Name and email are required";

/// Stored user. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub created: DateTime<Utc>,
}

/// Registration input. Email format is not checked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

impl NewUser {
    pub fn validate(&self) -> Result<(), ServiceError> {
        if self.name.is_empty() || self.email.is_empty() {
            return Err(ServiceError::validation(INVALID_USER_MSG));
        }
        Ok(())
    }

    pub(crate) fn into_user(self, id: i64, created: DateTime<Utc>) -> User {
        User { id, name: self.name, email: self.email, created }
    }
}
