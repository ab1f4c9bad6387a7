use serde::{Deserialize, Serialize};

/// Liveness payload served by each registry on `/health`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Health {
    pub status: String,
    pub service: String,
}

impl Health {
    pub fn healthy(service: &str) -> Self {
        Self { status: "healthy".to_string(), service: service.to_string() }
    }
}

/// Uniform error body: `{"error": "<message>"}`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
}
