//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers (admit, cancel, import) write through the store; query
//! handlers (list bookings, launchpads, destinations) only read.

pub mod handlers;

pub use handlers::{
    // Booking handlers
    AdmitBookingHandler, CancelBookingCommand, CancelBookingHandler, CancelBookingResult,
    ConflictCheck, ConflictChecker, ListBookingsHandler, ListBookingsQuery, DEFAULT_MAX_ATTEMPTS,
    // Catalog handlers
    CatalogRefresher, ImportCatalogHandler, ImportSummary, ListDestinationsHandler,
    ListLaunchpadsHandler,
};
