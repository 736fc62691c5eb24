//! ListDestinationsHandler - Query handler for destinations.

use std::sync::Arc;

use crate::domain::catalog::Destination;
use crate::domain::foundation::DomainError;
use crate::ports::DestinationCatalog;

pub struct ListDestinationsHandler {
    catalog: Arc<dyn DestinationCatalog>,
}

impl ListDestinationsHandler {
    pub fn new(catalog: Arc<dyn DestinationCatalog>) -> Self {
        Self { catalog }
    }

    pub async fn handle(&self) -> Result<Vec<Destination>, DomainError> {
        self.catalog.list().await
    }
}
