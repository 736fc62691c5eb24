//! PostgreSQL adapters - Database implementations of the store and catalog ports.
//!
//! - `PostgresReservationStore` - SERIALIZABLE admission transactions,
//!   booking listing and feed slot inserts
//! - `PostgresCatalog` - launchpads and destinations
//!
//! Schema lives in `migrations/` and is applied with [`MIGRATOR`].

mod catalog;
mod errors;
mod reservation_store;

pub use catalog::PostgresCatalog;
pub use reservation_store::{PostgresReservationStore, PostgresReservationTransaction};

/// Embedded schema migrations.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
