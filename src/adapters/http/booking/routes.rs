//! Axum router configuration for booking endpoints.

use axum::{
    routing::{delete, get},
    Router,
};

use super::handlers::{cancel_booking, create_booking, health, list_bookings, BookingAppState};

/// Create the booking API router.
///
/// # Routes
///
/// - `GET /booking` - List all bookings
/// - `POST /booking` - Admit a booking
/// - `DELETE /booking/:id` - Cancel a booking
/// - `GET /health` - Reservation store connectivity
pub fn booking_routes() -> Router<BookingAppState> {
    Router::new()
        .route("/booking", get(list_bookings).post(create_booking))
        .route("/booking/:id", delete(cancel_booking))
        .route("/health", get(health))
}

/// Create the booking router with its state applied.
pub fn booking_router(state: BookingAppState) -> Router {
    booking_routes().with_state(state)
}
