//! Booking command and query handlers.

mod admit_booking;
mod cancel_booking;
mod conflict_checker;
mod list_bookings;
mod retry;

pub use admit_booking::AdmitBookingHandler;
pub use cancel_booking::{CancelBookingCommand, CancelBookingHandler, CancelBookingResult};
pub use conflict_checker::{ConflictCheck, ConflictChecker};
pub use list_bookings::{ListBookingsHandler, ListBookingsQuery};
pub use retry::DEFAULT_MAX_ATTEMPTS;
