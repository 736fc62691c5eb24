//! In-Memory Catalog Adapter
//!
//! Launchpads and destinations held in memory. Useful for testing and for
//! running without a database.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::catalog::{Destination, Launchpad};
use crate::domain::foundation::{DestinationId, DomainError, LaunchpadId};
use crate::ports::{DestinationCatalog, LaunchpadCatalog, LaunchpadCatalogWriter};

/// Destinations seeded by the schema migration, with the same ids.
const DEFAULT_DESTINATIONS: &[(u128, &str)] = &[
    (0x6f1c2a4e_8b3d_4d5e_9f60_1a2b3c4d5e01, "Mars"),
    (0x6f1c2a4e_8b3d_4d5e_9f60_1a2b3c4d5e02, "Moon"),
    (0x6f1c2a4e_8b3d_4d5e_9f60_1a2b3c4d5e03, "Pluto"),
    (0x6f1c2a4e_8b3d_4d5e_9f60_1a2b3c4d5e04, "Asteroid Belt"),
    (0x6f1c2a4e_8b3d_4d5e_9f60_1a2b3c4d5e05, "Europa"),
    (0x6f1c2a4e_8b3d_4d5e_9f60_1a2b3c4d5e06, "Titan"),
    (0x6f1c2a4e_8b3d_4d5e_9f60_1a2b3c4d5e07, "Ganymede"),
];

/// In-memory launchpad and destination catalog.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    launchpads: Arc<RwLock<HashMap<LaunchpadId, Launchpad>>>,
    destinations: Arc<RwLock<HashMap<DestinationId, Destination>>>,
}

impl InMemoryCatalog {
    pub fn new(launchpads: Vec<Launchpad>, destinations: Vec<Destination>) -> Self {
        Self {
            launchpads: Arc::new(RwLock::new(
                launchpads.into_iter().map(|l| (l.id.clone(), l)).collect(),
            )),
            destinations: Arc::new(RwLock::new(
                destinations.into_iter().map(|d| (d.id, d)).collect(),
            )),
        }
    }

    /// Catalog with the standard destinations.
    pub fn with_default_destinations(launchpads: Vec<Launchpad>) -> Self {
        Self::new(launchpads, default_destinations())
    }

    pub async fn add_destination(&self, destination: Destination) {
        self.destinations
            .write()
            .await
            .insert(destination.id, destination);
    }

    pub async fn launchpad_count(&self) -> usize {
        self.launchpads.read().await.len()
    }
}

/// The standard destinations, ordered as seeded.
pub fn default_destinations() -> Vec<Destination> {
    DEFAULT_DESTINATIONS
        .iter()
        .map(|(id, name)| Destination::new(DestinationId::from_uuid(Uuid::from_u128(*id)), *name))
        .collect()
}

#[async_trait]
impl LaunchpadCatalog for InMemoryCatalog {
    async fn find(&self, id: &LaunchpadId) -> Result<Option<Launchpad>, DomainError> {
        Ok(self.launchpads.read().await.get(id).cloned())
    }

    async fn list_active(&self) -> Result<Vec<Launchpad>, DomainError> {
        let launchpads = self.launchpads.read().await;
        let mut active: Vec<_> = launchpads
            .values()
            .filter(|l| l.accepts_bookings())
            .cloned()
            .collect();
        active.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(active)
    }
}

#[async_trait]
impl LaunchpadCatalogWriter for InMemoryCatalog {
    async fn upsert_launchpad(&self, launchpad: &Launchpad) -> Result<(), DomainError> {
        self.launchpads
            .write()
            .await
            .insert(launchpad.id.clone(), launchpad.clone());
        Ok(())
    }
}

#[async_trait]
impl DestinationCatalog for InMemoryCatalog {
    async fn exists(&self, id: &DestinationId) -> Result<bool, DomainError> {
        Ok(self.destinations.read().await.contains_key(id))
    }

    async fn list(&self) -> Result<Vec<Destination>, DomainError> {
        let destinations = self.destinations.read().await;
        let mut all: Vec<_> = destinations.values().cloned().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(all)
    }
}
