//! HTTP handlers for booking endpoints.
//!
//! These handlers connect Axum routes to the admission, cancellation and
//! listing handlers of the application layer.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::{error, warn};

use crate::application::handlers::booking::{
    AdmitBookingHandler, CancelBookingCommand, CancelBookingHandler, ListBookingsHandler,
    ListBookingsQuery,
};
use crate::domain::booking::{AdmissionOutcome, BookingError};
use crate::domain::foundation::BookingId;
use crate::ports::{BookingReader, Clock, DestinationCatalog, LaunchpadCatalog, ReservationStore};

use super::dto::{BookingResponse, CreateBookingRequest, CreateBookingResponse, ErrorResponse};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state for booking endpoints.
///
/// Cloned per request; every dependency is Arc-wrapped.
#[derive(Clone)]
pub struct BookingAppState {
    pub store: Arc<dyn ReservationStore>,
    pub reader: Arc<dyn BookingReader>,
    pub launchpads: Arc<dyn LaunchpadCatalog>,
    pub destinations: Arc<dyn DestinationCatalog>,
    pub clock: Arc<dyn Clock>,
    pub max_attempts: u32,
}

impl BookingAppState {
    pub fn admit_booking_handler(&self) -> AdmitBookingHandler {
        AdmitBookingHandler::new(
            self.store.clone(),
            self.launchpads.clone(),
            self.destinations.clone(),
            self.clock.clone(),
        )
        .with_max_attempts(self.max_attempts)
    }

    pub fn cancel_booking_handler(&self) -> CancelBookingHandler {
        CancelBookingHandler::new(self.store.clone()).with_max_attempts(self.max_attempts)
    }

    pub fn list_bookings_handler(&self) -> ListBookingsHandler {
        ListBookingsHandler::new(self.reader.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Query Handlers (GET endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// GET /booking - List all bookings
pub async fn list_bookings(
    State(state): State<BookingAppState>,
) -> Result<impl IntoResponse, BookingApiError> {
    let bookings = state
        .list_bookings_handler()
        .handle(ListBookingsQuery)
        .await?;

    let response: Vec<BookingResponse> = bookings.into_iter().map(BookingResponse::from).collect();
    Ok(Json(response))
}

/// GET /health - Reservation store connectivity
pub async fn health(State(state): State<BookingAppState>) -> Response {
    match state.store.ping().await {
        Ok(()) => (StatusCode::OK, Json(serde_json::json!({ "status": "ok" }))).into_response(),
        Err(err) => {
            warn!(error = %err, "Health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(serde_json::json!({ "status": "unavailable" })),
            )
                .into_response()
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Command Handlers (POST/DELETE endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// POST /booking - Admit a booking
///
/// Business rejections are answered with `400` and their rule code.
pub async fn create_booking(
    State(state): State<BookingAppState>,
    payload: Result<Json<CreateBookingRequest>, JsonRejection>,
) -> Result<Response, BookingApiError> {
    let Json(body) = payload.map_err(|rejection| BookingApiError::BadRequest(rejection.body_text()))?;
    let request = body
        .into_admission_request()
        .map_err(|e| BookingApiError::BadRequest(e.to_string()))?;

    let outcome = state.admit_booking_handler().handle(request).await?;

    let response = match outcome {
        AdmissionOutcome::Admitted { booking_id, .. } => (
            StatusCode::CREATED,
            Json(CreateBookingResponse { id: booking_id }),
        )
            .into_response(),
        AdmissionOutcome::Rejected(rejection) => {
            (StatusCode::BAD_REQUEST, Json(ErrorResponse::from(rejection))).into_response()
        }
    };

    Ok(response)
}

/// DELETE /booking/:id - Cancel a booking
///
/// Answers `204` whether or not the booking existed.
pub async fn cancel_booking(
    State(state): State<BookingAppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, BookingApiError> {
    let booking_id: BookingId = id
        .parse()
        .map_err(|_| BookingApiError::BadRequest(format!("Invalid booking id: {}", id)))?;

    state
        .cancel_booking_handler()
        .handle(CancelBookingCommand { booking_id })
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error wrapper that maps failures to HTTP responses.
#[derive(Debug)]
pub enum BookingApiError {
    /// Malformed body, field or path parameter.
    BadRequest(String),
    /// The engine could not reach a decision.
    Booking(BookingError),
}

impl From<BookingError> for BookingApiError {
    fn from(err: BookingError) -> Self {
        Self::Booking(err)
    }
}

impl IntoResponse for BookingApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            BookingApiError::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new("BAD_REQUEST", message),
            ),
            BookingApiError::Booking(err) => {
                error!(error = %err, "Booking request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("INTERNAL_ERROR", "Internal server error"),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{DomainError, ErrorCode};

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn bad_request_maps_to_400() {
        let response = BookingApiError::BadRequest("missing field".to_string()).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["code"], "BAD_REQUEST");
        assert_eq!(body["message"], "missing field");
    }

    #[tokio::test]
    async fn store_failure_maps_to_500_without_leaking_cause() {
        let err = BookingError::from(DomainError::new(
            ErrorCode::DatabaseError,
            "password authentication failed",
        ));

        let response = BookingApiError::from(err).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["code"], "INTERNAL_ERROR");
        assert!(!body["message"].as_str().unwrap().contains("password"));
    }

    #[tokio::test]
    async fn exhausted_retries_map_to_500() {
        let err = BookingError::ConflictRetriesExhausted { attempts: 3 };

        let response = BookingApiError::from(err).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
