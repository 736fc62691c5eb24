//! Booking module - reservations of launchpad slots for passengers.
//!
//! - [`Booking`] and [`ScheduledSlot`] are the two correlated records the
//!   admission engine writes and removes as one unit.
//! - [`validate_request`] holds the rules that need no shared state.
//! - [`Rejection`] names every business rule violation.

mod admission;
mod aggregate;
mod errors;
mod passenger;
mod slot;
mod validator;

pub use admission::{AdmissionOutcome, AdmissionRequest, Rejection};
pub use aggregate::Booking;
pub use errors::BookingError;
pub use passenger::{Gender, Passenger};
pub use slot::{ScheduledSlot, SlotSource};
pub use validator::validate_request;
