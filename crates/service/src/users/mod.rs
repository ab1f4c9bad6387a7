//! User registry: domain types and storage.

pub mod domain;
pub mod repository;

pub use domain::{NewUser, User};
pub use repository::UserRepository;
