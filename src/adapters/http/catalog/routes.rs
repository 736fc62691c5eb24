//! Axum router configuration for catalog endpoints.

use axum::{routing::get, Router};

use super::handlers::{list_destinations, list_launchpads, CatalogAppState};

/// Create the catalog API router.
///
/// # Routes
///
/// - `GET /launchpad` - List active launchpads
/// - `GET /destination` - List all destinations
pub fn catalog_routes() -> Router<CatalogAppState> {
    Router::new()
        .route("/launchpad", get(list_launchpads))
        .route("/destination", get(list_destinations))
}

/// Create the catalog router with its state applied.
pub fn catalog_router(state: CatalogAppState) -> Router {
    catalog_routes().with_state(state)
}
