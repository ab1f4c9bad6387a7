//! Storage abstractions for the service layer
//!
//! Every registry keeps its records in a [`resource_store::ResourceStore`]:
//! an in-memory map plus its id counter behind one reader/writer lock.

pub mod resource_store;

pub use resource_store::ResourceStore;
