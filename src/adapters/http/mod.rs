//! HTTP adapters - REST API implementations.
//!
//! Each domain module has its own HTTP adapter for endpoint exposure.

pub mod booking;
pub mod catalog;

use axum::Router;

// Re-export key types for convenience
pub use booking::{booking_router, BookingAppState};
pub use catalog::{catalog_router, CatalogAppState};

/// Create the complete API router.
pub fn api_router(booking_state: BookingAppState, catalog_state: CatalogAppState) -> Router {
    Router::new()
        .merge(booking_router(booking_state))
        .merge(catalog_router(catalog_state))
}
