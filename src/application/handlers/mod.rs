//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod booking;
pub mod catalog;

pub use booking::{
    AdmitBookingHandler, CancelBookingCommand, CancelBookingHandler, CancelBookingResult,
    ConflictCheck, ConflictChecker, ListBookingsHandler, ListBookingsQuery, DEFAULT_MAX_ATTEMPTS,
};
pub use catalog::{
    CatalogRefresher, ImportCatalogHandler, ImportSummary, ListDestinationsHandler,
    ListLaunchpadsHandler,
};
