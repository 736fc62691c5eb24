//! Launchpad catalog ports.
//!
//! The booking engine reads launchpads through [`LaunchpadCatalog`]; the
//! catalog importer keeps them current through [`LaunchpadCatalogWriter`].
//! Both are usually implemented by the same adapter.

use async_trait::async_trait;

use crate::domain::catalog::Launchpad;
use crate::domain::foundation::{DomainError, LaunchpadId};

/// Read-only access to launchpads.
#[async_trait]
pub trait LaunchpadCatalog: Send + Sync {
    /// Find a launchpad by id. Returns `None` if the catalog doesn't know it.
    async fn find(&self, id: &LaunchpadId) -> Result<Option<Launchpad>, DomainError>;

    /// All launchpads currently accepting bookings, ordered by name.
    async fn list_active(&self) -> Result<Vec<Launchpad>, DomainError>;

    /// True when the launchpad exists and its status is `active`.
    ///
    /// Unknown launchpads are reported as not active rather than as an error.
    async fn exists_active(&self, id: &LaunchpadId) -> Result<bool, DomainError> {
        Ok(self
            .find(id)
            .await?
            .map(|launchpad| launchpad.accepts_bookings())
            .unwrap_or(false))
    }
}

/// Write side used by the catalog importer.
#[async_trait]
pub trait LaunchpadCatalogWriter: Send + Sync {
    /// Insert the launchpad, or update its name and status if the id exists.
    async fn upsert_launchpad(&self, launchpad: &Launchpad) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::LaunchpadStatus;

    struct SingleLaunchpad(Launchpad);

    #[async_trait]
    impl LaunchpadCatalog for SingleLaunchpad {
        async fn find(&self, id: &LaunchpadId) -> Result<Option<Launchpad>, DomainError> {
            Ok((&self.0.id == id).then(|| self.0.clone()))
        }

        async fn list_active(&self) -> Result<Vec<Launchpad>, DomainError> {
            Ok(vec![self.0.clone()])
        }
    }

    fn pad(status: LaunchpadStatus) -> SingleLaunchpad {
        SingleLaunchpad(Launchpad::new(LaunchpadId::new("LP1").unwrap(), "LC-39A", status))
    }

    #[test]
    fn launchpad_catalog_is_object_safe() {
        fn _accepts_dyn(_catalog: &dyn LaunchpadCatalog) {}
        fn _accepts_dyn_writer(_writer: &dyn LaunchpadCatalogWriter) {}
    }

    #[tokio::test]
    async fn exists_active_requires_active_status() {
        let id = LaunchpadId::new("LP1").unwrap();
        assert!(pad(LaunchpadStatus::Active).exists_active(&id).await.unwrap());
        assert!(!pad(LaunchpadStatus::Retired).exists_active(&id).await.unwrap());
    }

    #[tokio::test]
    async fn exists_active_is_false_for_unknown_launchpad() {
        let unknown = LaunchpadId::new("LP2").unwrap();
        assert!(!pad(LaunchpadStatus::Active).exists_active(&unknown).await.unwrap());
    }
}
