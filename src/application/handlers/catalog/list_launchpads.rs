//! ListLaunchpadsHandler - Query handler for bookable launchpads.

use std::sync::Arc;

use crate::domain::catalog::Launchpad;
use crate::domain::foundation::DomainError;
use crate::ports::LaunchpadCatalog;

/// Handler returning the launchpads that currently accept bookings.
pub struct ListLaunchpadsHandler {
    catalog: Arc<dyn LaunchpadCatalog>,
}

impl ListLaunchpadsHandler {
    pub fn new(catalog: Arc<dyn LaunchpadCatalog>) -> Self {
        Self { catalog }
    }

    pub async fn handle(&self) -> Result<Vec<Launchpad>, DomainError> {
        self.catalog.list_active().await
    }
}
