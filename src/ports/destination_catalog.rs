//! Destination catalog port (read side).

use async_trait::async_trait;

use crate::domain::catalog::Destination;
use crate::domain::foundation::{DestinationId, DomainError};

/// Read-only access to bookable destinations.
#[async_trait]
pub trait DestinationCatalog: Send + Sync {
    /// True when the destination is in the catalog.
    async fn exists(&self, id: &DestinationId) -> Result<bool, DomainError>;

    /// All destinations, ordered by name.
    async fn list(&self) -> Result<Vec<Destination>, DomainError>;
}
