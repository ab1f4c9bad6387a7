//! Order registry: domain types, status validation, storage and the
//! enriched single-order read.

pub mod domain;
pub mod repository;
pub mod service;
pub mod status;

pub use domain::{EnrichedOrder, NewOrder, Order, UserSummary};
pub use repository::OrderRepository;
pub use service::OrderService;
pub use status::{is_valid_status, OrderStatus};
