//! ImportCatalogHandler - synchronizes launchpads and feed launches.
//!
//! 1. Every feed launchpad is upserted, so status changes (a pad retiring)
//!    reach admission on the next import.
//! 2. Every upcoming launch becomes a feed slot on its UTC calendar day.
//!    Launches already recorded, or landing on a day the pad is already
//!    occupied, are skipped.
//!
//! Launches without a launchpad or with an unusable date are counted and
//! ignored; they cannot occupy a slot.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::domain::booking::ScheduledSlot;
use crate::domain::catalog::{Launchpad, LaunchpadStatus};
use crate::domain::foundation::{DomainError, LaunchDate, LaunchpadId, Timestamp};
use crate::ports::{FeedLaunch, FeedSlotWriter, LaunchFeed, LaunchpadCatalogWriter};

/// Counts of one import run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub launchpads_upserted: usize,
    pub launches_inserted: usize,
    /// Already known by external id or (launchpad, date).
    pub launches_skipped: usize,
    /// Missing launchpad or unusable date.
    pub launches_invalid: usize,
}

pub struct ImportCatalogHandler {
    feed: Arc<dyn LaunchFeed>,
    launchpads: Arc<dyn LaunchpadCatalogWriter>,
    slots: Arc<dyn FeedSlotWriter>,
}

impl ImportCatalogHandler {
    pub fn new(
        feed: Arc<dyn LaunchFeed>,
        launchpads: Arc<dyn LaunchpadCatalogWriter>,
        slots: Arc<dyn FeedSlotWriter>,
    ) -> Self {
        Self {
            feed,
            launchpads,
            slots,
        }
    }

    /// Runs one import.
    ///
    /// # Errors
    ///
    /// - `ExternalServiceError` if the feed cannot be fetched or decoded
    /// - `DatabaseError` if a write fails; writes made before the failure stay
    #[instrument(name = "import_catalog", skip_all)]
    pub async fn handle(&self) -> Result<ImportSummary, DomainError> {
        let mut summary = ImportSummary::default();

        let feed_launchpads = self.feed.fetch_launchpads().await?;
        for feed_launchpad in feed_launchpads {
            let id = match LaunchpadId::new(feed_launchpad.id) {
                Ok(id) => id,
                Err(err) => {
                    warn!(error = %err, name = %feed_launchpad.name, "Skipping feed launchpad");
                    continue;
                }
            };
            let launchpad = Launchpad::new(
                id,
                feed_launchpad.name,
                LaunchpadStatus::parse(&feed_launchpad.status),
            );
            self.launchpads.upsert_launchpad(&launchpad).await?;
            summary.launchpads_upserted += 1;
        }

        let launches = self.feed.fetch_upcoming_launches().await?;
        for launch in launches {
            let Some(slot) = slot_for(&launch) else {
                warn!(external_id = %launch.id, "Skipping launch without launchpad or date");
                summary.launches_invalid += 1;
                continue;
            };
            if self.slots.insert_feed_slot(&slot).await? {
                summary.launches_inserted += 1;
            } else {
                summary.launches_skipped += 1;
            }
        }

        info!(
            launchpads_upserted = summary.launchpads_upserted,
            launches_inserted = summary.launches_inserted,
            launches_skipped = summary.launches_skipped,
            launches_invalid = summary.launches_invalid,
            "Catalog imported"
        );

        Ok(summary)
    }
}

fn slot_for(launch: &FeedLaunch) -> Option<ScheduledSlot> {
    let launchpad_id = launch
        .launchpad
        .as_deref()
        .and_then(|id| LaunchpadId::new(id).ok())?;
    let day = Timestamp::from_unix_secs(launch.date_unix)?.utc_date();
    Some(ScheduledSlot::from_feed(
        launch.id.clone(),
        launchpad_id,
        LaunchDate::new(day),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryCatalog, InMemoryReservationStore};
    use crate::domain::foundation::ErrorCode;
    use crate::ports::{FeedLaunchpad, LaunchFeedError, LaunchpadCatalog};
    use async_trait::async_trait;

    // ════════════════════════════════════════════════════════════════════════════
    // Mock Implementations
    // ════════════════════════════════════════════════════════════════════════════

    struct MockFeed {
        launchpads: Vec<FeedLaunchpad>,
        launches: Vec<FeedLaunch>,
        fail: bool,
    }

    #[async_trait]
    impl LaunchFeed for MockFeed {
        async fn fetch_launchpads(&self) -> Result<Vec<FeedLaunchpad>, LaunchFeedError> {
            if self.fail {
                return Err(LaunchFeedError::Transport("connection refused".to_string()));
            }
            Ok(self.launchpads.clone())
        }

        async fn fetch_upcoming_launches(&self) -> Result<Vec<FeedLaunch>, LaunchFeedError> {
            Ok(self.launches.clone())
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Helpers
    // ════════════════════════════════════════════════════════════════════════════

    const PAD: &str = "5e9e4502f509094188566f88";

    // 2030-01-01T00:00:00Z
    const NEW_YEAR_2030: i64 = 1_893_456_000;

    fn feed_launchpad(status: &str) -> FeedLaunchpad {
        FeedLaunchpad {
            id: PAD.to_string(),
            name: "KSC LC 39A".to_string(),
            status: status.to_string(),
        }
    }

    fn launch(id: &str, launchpad: Option<&str>, date_unix: i64) -> FeedLaunch {
        FeedLaunch {
            id: id.to_string(),
            launchpad: launchpad.map(str::to_string),
            date_unix,
        }
    }

    fn handler(
        feed: MockFeed,
    ) -> (
        ImportCatalogHandler,
        Arc<InMemoryCatalog>,
        Arc<InMemoryReservationStore>,
    ) {
        let catalog = Arc::new(InMemoryCatalog::new(vec![], vec![]));
        let store = Arc::new(InMemoryReservationStore::new());
        let handler = ImportCatalogHandler::new(Arc::new(feed), catalog.clone(), store.clone());
        (handler, catalog, store)
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn imports_launchpads_and_launches() {
        let (handler, catalog, store) = handler(MockFeed {
            launchpads: vec![feed_launchpad("active")],
            launches: vec![launch("launch-1", Some(PAD), NEW_YEAR_2030 + 3_600)],
            fail: false,
        });

        let summary = handler.handle().await.unwrap();

        assert_eq!(summary.launchpads_upserted, 1);
        assert_eq!(summary.launches_inserted, 1);
        let pad = LaunchpadId::new(PAD).unwrap();
        assert!(catalog.exists_active(&pad).await.unwrap());

        let slots = store.slots().await;
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].date, LaunchDate::from_ymd(2030, 1, 1).unwrap());
        assert_eq!(slots[0].external_id(), Some("launch-1"));
    }

    #[tokio::test]
    async fn reimport_skips_known_launches() {
        let (handler, _catalog, store) = handler(MockFeed {
            launchpads: vec![feed_launchpad("active")],
            launches: vec![launch("launch-1", Some(PAD), NEW_YEAR_2030)],
            fail: false,
        });

        handler.handle().await.unwrap();
        let summary = handler.handle().await.unwrap();

        assert_eq!(summary.launches_inserted, 0);
        assert_eq!(summary.launches_skipped, 1);
        assert_eq!(store.slots().await.len(), 1);
    }

    #[tokio::test]
    async fn second_launch_same_day_is_skipped() {
        let (handler, _catalog, store) = handler(MockFeed {
            launchpads: vec![feed_launchpad("active")],
            launches: vec![
                launch("launch-1", Some(PAD), NEW_YEAR_2030),
                launch("launch-2", Some(PAD), NEW_YEAR_2030 + 7_200),
            ],
            fail: false,
        });

        let summary = handler.handle().await.unwrap();

        assert_eq!(summary.launches_inserted, 1);
        assert_eq!(summary.launches_skipped, 1);
        assert_eq!(store.slots().await.len(), 1);
    }

    #[tokio::test]
    async fn launches_without_launchpad_are_invalid() {
        let (handler, _catalog, store) = handler(MockFeed {
            launchpads: vec![],
            launches: vec![launch("launch-1", None, NEW_YEAR_2030)],
            fail: false,
        });

        let summary = handler.handle().await.unwrap();

        assert_eq!(summary.launches_invalid, 1);
        assert!(store.slots().await.is_empty());
    }

    #[tokio::test]
    async fn status_change_is_applied_on_reimport() {
        let catalog = Arc::new(InMemoryCatalog::new(vec![], vec![]));
        let store = Arc::new(InMemoryReservationStore::new());
        let pad = LaunchpadId::new(PAD).unwrap();

        for status in ["active", "retired"] {
            let handler = ImportCatalogHandler::new(
                Arc::new(MockFeed {
                    launchpads: vec![feed_launchpad(status)],
                    launches: vec![],
                    fail: false,
                }),
                catalog.clone(),
                store.clone(),
            );
            handler.handle().await.unwrap();
        }

        assert!(!catalog.exists_active(&pad).await.unwrap());
        assert_eq!(
            catalog.find(&pad).await.unwrap().map(|l| l.status),
            Some(LaunchpadStatus::Retired)
        );
    }

    #[tokio::test]
    async fn feed_failure_is_external_service_error() {
        let (handler, _catalog, _store) = handler(MockFeed {
            launchpads: vec![],
            launches: vec![],
            fail: true,
        });

        let err = handler.handle().await.unwrap_err();

        assert_eq!(err.code, ErrorCode::ExternalServiceError);
    }
}
