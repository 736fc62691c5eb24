//! In-memory adapters for tests and database-less runs.

mod catalog;
mod reservation_store;

pub use catalog::{default_destinations, InMemoryCatalog};
pub use reservation_store::{InMemoryReservationStore, TransactionStats};
