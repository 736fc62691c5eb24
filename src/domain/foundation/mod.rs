//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers and error types that form the
//! vocabulary of the booking domain.

mod calendar;
mod errors;
mod ids;
mod timestamp;

pub use calendar::{IsoWeek, LaunchDate};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{BookingId, DestinationId, LaunchpadId, SlotId};
pub use timestamp::Timestamp;
