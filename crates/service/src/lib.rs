//! Service layer for the order and user registries.
//! - `storage`: the concurrent keyed store both registries build on.
//! - `orders` / `users`: domain types, validation and repositories.
//! - `enrichment`: best-effort user lookup used by order reads.

pub mod enrichment;
pub mod errors;
pub mod orders;
pub mod storage;
pub mod users;
