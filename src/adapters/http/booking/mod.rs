//! HTTP adapter for booking endpoints.
//!
//! - `GET /booking` - List all bookings
//! - `POST /booking` - Admit a booking
//! - `DELETE /booking/:id` - Cancel a booking
//! - `GET /health` - Reservation store connectivity

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::*;
pub use handlers::{BookingApiError, BookingAppState};
pub use routes::{booking_router, booking_routes};
