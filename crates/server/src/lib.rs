pub mod bootstrap;
pub mod errors;
pub mod metrics;
pub mod routes;
pub mod startup;

pub use startup::{run_order_service, run_user_service};
