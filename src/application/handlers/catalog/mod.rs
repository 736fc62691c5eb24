//! Catalog handlers - listing and synchronization with the launch feed.

mod catalog_refresher;
mod import_catalog;
mod list_destinations;
mod list_launchpads;

pub use catalog_refresher::CatalogRefresher;
pub use import_catalog::{ImportCatalogHandler, ImportSummary};
pub use list_destinations::ListDestinationsHandler;
pub use list_launchpads::ListLaunchpadsHandler;
