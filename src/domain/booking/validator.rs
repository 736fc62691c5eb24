//! Stateless request validation.
//!
//! Only rules that need no store or catalog data live here. Everything
//! that reads shared state is checked inside the admission transaction.

use chrono::NaiveDate;

use super::{AdmissionRequest, Rejection};

/// Validates the temporal shape of a request against the current date.
///
/// A launch date carries no time of day, so a launch "today" has already
/// begun and is rejected as being in the past.
pub fn validate_request(request: &AdmissionRequest, today: NaiveDate) -> Result<(), Rejection> {
    if !request.launch_date.is_after(today) {
        return Err(Rejection::LaunchDateIsInPast);
    }
    Ok(())
}
