//! ConflictChecker - business rules that need the catalog or the store.
//!
//! Rules are evaluated in a fixed order and the first violation wins:
//!
//! 1. the launchpad exists and is active
//! 2. the destination id is well formed
//! 3. the destination exists
//! 4. no slot occupies the launchpad on the requested date
//! 5. no booking on the launchpad in the same ISO week flies to the same
//!    destination
//!
//! The checker only reads. Slot and booking reads go through the caller's
//! transaction so the inserts that follow are guarded by the same view.
//! Catalog checks ask the transaction first and fall back to the catalog
//! ports when the store does not hold the catalog.

use std::sync::Arc;

use tracing::debug;

use crate::domain::booking::{AdmissionRequest, Rejection};
use crate::domain::foundation::{DestinationId, DomainError, LaunchpadId};
use crate::ports::{DestinationCatalog, LaunchpadCatalog, ReservationTransaction};

/// Result of a conflict check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConflictCheck {
    /// No rule is violated. Carries the parsed ids.
    Clear {
        launchpad_id: LaunchpadId,
        destination_id: DestinationId,
    },
    Rejected(Rejection),
}

pub struct ConflictChecker {
    launchpads: Arc<dyn LaunchpadCatalog>,
    destinations: Arc<dyn DestinationCatalog>,
}

impl ConflictChecker {
    pub fn new(
        launchpads: Arc<dyn LaunchpadCatalog>,
        destinations: Arc<dyn DestinationCatalog>,
    ) -> Self {
        Self {
            launchpads,
            destinations,
        }
    }

    /// Evaluates the rules against the catalog and the open transaction.
    ///
    /// # Errors
    ///
    /// Any catalog or store failure. A violated rule is not an error.
    pub async fn check(
        &self,
        request: &AdmissionRequest,
        tx: &mut dyn ReservationTransaction,
    ) -> Result<ConflictCheck, DomainError> {
        let launchpad_id = match LaunchpadId::new(request.launchpad_id.as_str()) {
            Ok(id) => id,
            Err(_) => return Ok(reject(Rejection::LaunchpadNotAvailable)),
        };
        let active = match tx.launchpad_is_active(&launchpad_id).await? {
            Some(active) => active,
            None => self.launchpads.exists_active(&launchpad_id).await?,
        };
        if !active {
            return Ok(reject(Rejection::LaunchpadNotAvailable));
        }

        let destination_id = match request.destination_id.parse::<DestinationId>() {
            Ok(id) => id,
            Err(_) => return Ok(reject(Rejection::DestinationIdIsInvalid)),
        };

        let exists = match tx.destination_exists(&destination_id).await? {
            Some(exists) => exists,
            None => self.destinations.exists(&destination_id).await?,
        };
        if !exists {
            return Ok(reject(Rejection::DestinationIsInvalid));
        }

        let same_day = tx
            .slots_at_launchpad_and_date(&launchpad_id, request.launch_date)
            .await?;
        if !same_day.is_empty() {
            return Ok(reject(Rejection::LaunchpadBusy));
        }

        let week = request.launch_date.iso_week();
        let same_week = tx
            .slots_at_launchpad_and_iso_week(&launchpad_id, week)
            .await?;
        for slot in same_week {
            // Feed slots have no booking and never match a destination.
            if tx.destination_of_booking(slot.id).await? == Some(destination_id) {
                return Ok(reject(Rejection::SameDestinationInWeek));
            }
        }

        debug!(
            %launchpad_id,
            launch_date = %request.launch_date,
            %week,
            "No conflicts found"
        );

        Ok(ConflictCheck::Clear {
            launchpad_id,
            destination_id,
        })
    }
}

fn reject(rejection: Rejection) -> ConflictCheck {
    debug!(code = rejection.code(), "Conflict check rejected request");
    ConflictCheck::Rejected(rejection)
}
