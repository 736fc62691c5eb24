//! HTTP handlers for catalog endpoints.

use std::sync::Arc;

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::error;

use crate::adapters::http::booking::ErrorResponse;
use crate::application::handlers::catalog::{ListDestinationsHandler, ListLaunchpadsHandler};
use crate::domain::foundation::DomainError;
use crate::ports::{DestinationCatalog, LaunchpadCatalog};

use super::dto::{DestinationResponse, LaunchpadResponse};

/// Shared state for catalog endpoints.
#[derive(Clone)]
pub struct CatalogAppState {
    pub launchpads: Arc<dyn LaunchpadCatalog>,
    pub destinations: Arc<dyn DestinationCatalog>,
}

impl CatalogAppState {
    pub fn list_launchpads_handler(&self) -> ListLaunchpadsHandler {
        ListLaunchpadsHandler::new(self.launchpads.clone())
    }

    pub fn list_destinations_handler(&self) -> ListDestinationsHandler {
        ListDestinationsHandler::new(self.destinations.clone())
    }
}

/// GET /launchpad - List active launchpads
pub async fn list_launchpads(
    State(state): State<CatalogAppState>,
) -> Result<impl IntoResponse, CatalogApiError> {
    let launchpads = state.list_launchpads_handler().handle().await?;
    let response: Vec<LaunchpadResponse> =
        launchpads.into_iter().map(LaunchpadResponse::from).collect();
    Ok(Json(response))
}

/// GET /destination - List all destinations
pub async fn list_destinations(
    State(state): State<CatalogAppState>,
) -> Result<impl IntoResponse, CatalogApiError> {
    let destinations = state.list_destinations_handler().handle().await?;
    let response: Vec<DestinationResponse> = destinations
        .into_iter()
        .map(DestinationResponse::from)
        .collect();
    Ok(Json(response))
}

/// Catalog reads only fail on infrastructure errors.
#[derive(Debug)]
pub struct CatalogApiError(DomainError);

impl From<DomainError> for CatalogApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl IntoResponse for CatalogApiError {
    fn into_response(self) -> Response {
        error!(error = %self.0, "Catalog request failed");
        let body = ErrorResponse::new("INTERNAL_ERROR", "Internal server error");
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}
