//! HTTP adapter for catalog endpoints.
//!
//! - `GET /launchpad` - List active launchpads
//! - `GET /destination` - List all destinations

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::*;
pub use handlers::{CatalogApiError, CatalogAppState};
pub use routes::{catalog_router, catalog_routes};
