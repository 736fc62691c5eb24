//! Data Transfer Objects for booking endpoints.
//!
//! Dates are `YYYY-MM-DD`, gender is `"Male"` or `"Female"`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::booking::{AdmissionRequest, Booking, Gender, Passenger, Rejection};
use crate::domain::foundation::{
    BookingId, DestinationId, LaunchDate, LaunchpadId, ValidationError,
};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to book a passenger on a launch.
///
/// Both catalog ids are kept as text; an unknown or blank id is a business
/// rejection, not a malformed request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub birthday: NaiveDate,
    pub launchpad_id: String,
    pub destination_id: String,
    pub launch_date: LaunchDate,
}

impl CreateBookingRequest {
    /// # Errors
    ///
    /// `ValidationError` for blank names.
    pub fn into_admission_request(self) -> Result<AdmissionRequest, ValidationError> {
        Ok(AdmissionRequest {
            passenger: Passenger::try_new(
                self.first_name,
                self.last_name,
                self.gender,
                self.birthday,
            )?,
            launchpad_id: self.launchpad_id,
            destination_id: self.destination_id,
            launch_date: self.launch_date,
        })
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Response to an admitted booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBookingResponse {
    pub id: BookingId,
}

/// A booking as listed by `GET /booking`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub id: BookingId,
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub birthday: NaiveDate,
    pub launchpad_id: LaunchpadId,
    pub destination_id: DestinationId,
    pub launch_date: LaunchDate,
}

impl From<Booking> for BookingResponse {
    fn from(booking: Booking) -> Self {
        Self {
            id: booking.id,
            first_name: booking.passenger.first_name,
            last_name: booking.passenger.last_name,
            gender: booking.passenger.gender,
            birthday: booking.passenger.birthday,
            launchpad_id: booking.launchpad_id,
            destination_id: booking.destination_id,
            launch_date: booking.launch_date,
        }
    }
}

/// Error body for rejections and failures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl From<Rejection> for ErrorResponse {
    fn from(rejection: Rejection) -> Self {
        Self::new(rejection.code(), rejection.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request_json() -> serde_json::Value {
        json!({
            "firstName": "Ada",
            "lastName": "Lovelace",
            "gender": "Female",
            "birthday": "1990-12-10",
            "launchpadId": "5e9e4502f509094188566f88",
            "destinationId": "6f1c2a4e-8b3d-4d5e-9f60-1a2b3c4d5e01",
            "launchDate": "2030-06-12"
        })
    }

    #[test]
    fn create_request_deserializes() {
        let request: CreateBookingRequest = serde_json::from_value(request_json()).unwrap();

        assert_eq!(request.gender, Gender::Female);
        assert_eq!(request.launch_date, LaunchDate::from_ymd(2030, 6, 12).unwrap());
    }

    #[test]
    fn create_request_rejects_unknown_gender() {
        let mut value = request_json();
        value["gender"] = json!("Robot");

        assert!(serde_json::from_value::<CreateBookingRequest>(value).is_err());
    }

    #[test]
    fn create_request_rejects_malformed_date() {
        let mut value = request_json();
        value["launchDate"] = json!("12/06/2030");

        assert!(serde_json::from_value::<CreateBookingRequest>(value).is_err());
    }

    #[test]
    fn blank_name_fails_conversion() {
        let mut value = request_json();
        value["firstName"] = json!("   ");
        let request: CreateBookingRequest = serde_json::from_value(value).unwrap();

        let err = request.into_admission_request().unwrap_err();

        assert_eq!(err.field(), "first_name");
    }

    #[test]
    fn destination_id_is_passed_through_raw() {
        let mut value = request_json();
        value["destinationId"] = json!("not-a-uuid");
        let request: CreateBookingRequest = serde_json::from_value(value).unwrap();

        let admission = request.into_admission_request().unwrap();

        assert_eq!(admission.destination_id, "not-a-uuid");
    }

    #[test]
    fn blank_launchpad_id_is_passed_through_raw() {
        let mut value = request_json();
        value["launchpadId"] = json!("");
        let request: CreateBookingRequest = serde_json::from_value(value).unwrap();

        let admission = request.into_admission_request().unwrap();

        assert_eq!(admission.launchpad_id, "");
    }

    #[test]
    fn rejection_maps_to_error_body() {
        let body = ErrorResponse::from(Rejection::LaunchpadBusy);

        assert_eq!(body.code, "LAUNCHPAD_BUSY");
        assert_eq!(body.message, "launchpad is busy at given date");
    }
}
