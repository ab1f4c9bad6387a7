//! Best-effort user lookup against the user registry.
//!
//! The outcome is always an [`Enrichment`], never an error:
//! - transport failure (refused, timeout, DNS) → synthesized placeholder user
//! - non-success status or undecodable body → [`Enrichment::Unavailable`]
//!
//! One attempt per call, no retries.

pub mod client;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use client::HttpUserLookup;

/// The user fields the order registry consumes from the user registry.
/// Fields absent from the remote payload decode as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl UserProfile {
    /// Stand-in used when the user registry cannot be reached.
    pub fn placeholder(user_id: i64) -> Self {
        Self {
            id: user_id,
            name: format!("User {user_id}"),
            email: format!("user{user_id}@example.com"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Enrichment {
    Enriched(UserProfile),
    Unavailable,
}

impl Enrichment {
    pub fn into_profile(self) -> Option<UserProfile> {
        match self {
            Enrichment::Enriched(p) => Some(p),
            Enrichment::Unavailable => None,
        }
    }
}

/// Why a remote lookup did not yield a profile.
#[derive(Debug, Error)]
pub enum EnrichmentError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("user service returned status {0}")]
    Status(u16),
    #[error("undecodable user payload: {0}")]
    Decode(String),
}

impl EnrichmentError {
    /// Fold a failed lookup into the degrade policy.
    pub fn degrade(self, user_id: i64) -> Enrichment {
        match self {
            EnrichmentError::Transport(_) => Enrichment::Enriched(UserProfile::placeholder(user_id)),
            EnrichmentError::Status(_) | EnrichmentError::Decode(_) => Enrichment::Unavailable,
        }
    }
}

/// Source of user display data for order reads.
#[async_trait]
pub trait UserLookup: Send + Sync {
    async fn lookup(&self, user_id: i64) -> Enrichment;
}

/// Fixed-answer lookup for tests and offline runs
pub mod mock {
    use super::*;

    pub struct StaticLookup(pub Enrichment);

    #[async_trait]
    impl UserLookup for StaticLookup {
        async fn lookup(&self, user_id: i64) -> Enrichment {
            match &self.0 {
                Enrichment::Enriched(p) => Enrichment::Enriched(UserProfile { id: user_id, ..p.clone() }),
                Enrichment::Unavailable => Enrichment::Unavailable,
            }
        }
    }
}
