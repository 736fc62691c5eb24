//! CatalogRefresher - Background service that keeps the catalog current.
//!
//! Runs [`ImportCatalogHandler`] on a fixed interval, independent of request
//! serving. A failed import is logged and retried on the next tick; it never
//! stops the service.
//!
//! ## Graceful Shutdown
//!
//! The service listens on a watch channel and returns as soon as `true` is
//! sent, including while an import is in flight. The import is dropped at
//! its current await point; writes it already made stay, as they would after
//! a failed write, and the next import picks up the rest.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{error, info};

use super::import_catalog::{ImportCatalogHandler, ImportSummary};

pub struct CatalogRefresher {
    importer: Arc<ImportCatalogHandler>,
    interval: Duration,
}

impl CatalogRefresher {
    pub fn new(importer: Arc<ImportCatalogHandler>, interval: Duration) -> Self {
        Self { importer, interval }
    }

    /// Run the refresh loop until the shutdown signal is received.
    ///
    /// The first import happens one interval after start; a startup import
    /// is the caller's business.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        let mut interval = time::interval_at(Instant::now() + self.interval, self.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(interval_secs = self.interval.as_secs(), "Catalog refresher started");

        loop {
            tokio::select! {
                _ = shutdown_requested(&mut shutdown) => {
                    info!("Catalog refresher stopped");
                    return;
                }

                _ = interval.tick() => {
                    tokio::select! {
                        _ = shutdown_requested(&mut shutdown) => {
                            info!("Catalog refresher stopped, import in flight abandoned");
                            return;
                        }

                        _ = self.refresh_once() => {}
                    }
                }
            }
        }
    }

    /// Run exactly one import, logging instead of returning failures.
    pub async fn refresh_once(&self) -> Option<ImportSummary> {
        match self.importer.handle().await {
            Ok(summary) => Some(summary),
            Err(err) => {
                error!(error = %err, "Catalog refresh failed, retrying next interval");
                None
            }
        }
    }
}

/// Resolves once `true` is sent or the sender is gone.
async fn shutdown_requested(shutdown: &mut watch::Receiver<bool>) {
    loop {
        if *shutdown.borrow_and_update() {
            return;
        }
        if shutdown.changed().await.is_err() {
            return;
        }
    }
}
