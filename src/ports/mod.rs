//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Catalog Ports
//!
//! - `LaunchpadCatalog` / `LaunchpadCatalogWriter` - launchpads and their status
//! - `DestinationCatalog` - bookable destinations
//!
//! ## Reservation Ports
//!
//! - `ReservationStore` / `ReservationTransaction` - transactional slots and bookings
//! - `BookingReader` - listing queries outside transactions
//!
//! ## Import Ports
//!
//! - `LaunchFeed` - external launch catalog source
//! - `FeedSlotWriter` - records feed launches as occupied slots
//!
//! ## Environment
//!
//! - `Clock` - current date

mod booking_reader;
mod clock;
mod destination_catalog;
mod launch_feed;
mod launchpad_catalog;
mod reservation_store;

pub use booking_reader::BookingReader;
pub use clock::Clock;
pub use destination_catalog::DestinationCatalog;
pub use launch_feed::{FeedLaunch, FeedLaunchpad, FeedSlotWriter, LaunchFeed, LaunchFeedError};
pub use launchpad_catalog::{LaunchpadCatalog, LaunchpadCatalogWriter};
pub use reservation_store::{ReservationStore, ReservationTransaction};
