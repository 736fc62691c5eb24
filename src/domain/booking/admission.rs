//! Admission request, business rejections and outcome.
//!
//! Rejections are expected results of admission, not failures. They are
//! returned as data inside [`AdmissionOutcome`]; infrastructure failures
//! travel separately as [`super::BookingError`].

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{BookingId, LaunchDate, SlotId};

use super::Passenger;

/// Input of the admission engine. Never persisted as-is.
///
/// Both catalog references stay raw. A launchpad id that names nothing,
/// blank included, is `LAUNCHPAD_NOT_AVAILABLE`; a destination id has its
/// own syntax rule and rejection code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdmissionRequest {
    pub passenger: Passenger,
    pub launchpad_id: String,
    pub destination_id: String,
    pub launch_date: LaunchDate,
}

/// Named business rule violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Rejection {
    LaunchDateIsInPast,
    LaunchpadNotAvailable,
    DestinationIdIsInvalid,
    DestinationIsInvalid,
    LaunchpadBusy,
    SameDestinationInWeek,
}

impl Rejection {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Rejection::LaunchDateIsInPast => "LAUNCH_DATE_IS_IN_PAST",
            Rejection::LaunchpadNotAvailable => "LAUNCHPAD_NOT_AVAILABLE",
            Rejection::DestinationIdIsInvalid => "DESTINATION_ID_IS_INVALID",
            Rejection::DestinationIsInvalid => "DESTINATION_IS_INVALID",
            Rejection::LaunchpadBusy => "LAUNCHPAD_BUSY",
            Rejection::SameDestinationInWeek => "SAME_DESTINATION_IN_WEEK",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Rejection::LaunchDateIsInPast => "launch date is in past",
            Rejection::LaunchpadNotAvailable => "launchpad does not exist or is inactive",
            Rejection::DestinationIdIsInvalid => "malformed destination id",
            Rejection::DestinationIsInvalid => "destination does not exist",
            Rejection::LaunchpadBusy => "launchpad is busy at given date",
            Rejection::SameDestinationInWeek => {
                "launchpad already used/booked for this destination during requested week"
            }
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code(), self.message())
    }
}

/// Result of a completed admission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdmissionOutcome {
    /// Booking and slot were committed together.
    Admitted { booking_id: BookingId, slot_id: SlotId },
    /// A business rule rejected the request; nothing was written.
    Rejected(Rejection),
}

impl AdmissionOutcome {
    pub fn booking_id(&self) -> Option<BookingId> {
        match self {
            AdmissionOutcome::Admitted { booking_id, .. } => Some(*booking_id),
            AdmissionOutcome::Rejected(_) => None,
        }
    }

    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            AdmissionOutcome::Admitted { .. } => None,
            AdmissionOutcome::Rejected(rejection) => Some(*rejection),
        }
    }
}
