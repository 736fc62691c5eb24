//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `postgres` - Reservation store and catalog on PostgreSQL
//! - `memory` - In-memory store and catalog (tests, database-less runs)
//! - `spacex` - Launch feed client
//! - `http` - Axum REST API
//! - `clock` - System and fixed clocks

pub mod clock;
pub mod http;
pub mod memory;
pub mod postgres;
pub mod spacex;

pub use clock::{FixedClock, SystemClock};
pub use memory::{InMemoryCatalog, InMemoryReservationStore};
pub use postgres::{PostgresCatalog, PostgresReservationStore};
pub use spacex::{SpaceXClient, SpaceXConfig};
