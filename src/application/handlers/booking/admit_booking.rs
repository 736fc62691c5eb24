//! AdmitBookingHandler - the admission coordinator.
//!
//! Drives one request through validation, conflict checking and the paired
//! slot + booking insert, all inside a single store transaction:
//!
//! ```text
//! validate ──► begin ──► check ──► insert slot ──► insert booking ──► commit
//!    │                     │            │                 │              │
//!    ▼                     ▼            ▼                 ▼              ▼
//! rejected             rollback     rollback          rollback      conflict?
//! (no tx)              rejected     LAUNCHPAD_BUSY    failure       rerun
//! ```
//!
//! Transactions aborted by a concurrent writer are rerun from `begin` up to
//! the configured number of attempts.

use std::sync::Arc;

use tracing::{error, info, instrument};

use crate::domain::booking::{
    validate_request, AdmissionOutcome, AdmissionRequest, Booking, BookingError, Rejection,
    ScheduledSlot,
};
use crate::domain::foundation::{BookingId, DomainError, ErrorCode, SlotId};
use crate::ports::{
    Clock, DestinationCatalog, LaunchpadCatalog, ReservationStore, ReservationTransaction,
};

use super::conflict_checker::{ConflictCheck, ConflictChecker};
use super::retry::{with_conflict_retry, DEFAULT_MAX_ATTEMPTS};

/// Handler that admits or rejects booking requests.
pub struct AdmitBookingHandler {
    store: Arc<dyn ReservationStore>,
    checker: ConflictChecker,
    clock: Arc<dyn Clock>,
    max_attempts: u32,
}

impl AdmitBookingHandler {
    pub fn new(
        store: Arc<dyn ReservationStore>,
        launchpads: Arc<dyn LaunchpadCatalog>,
        destinations: Arc<dyn DestinationCatalog>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            checker: ConflictChecker::new(launchpads, destinations),
            clock,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Sets how many times a conflicting transaction is run before giving up.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Admits the request or reports the first violated rule.
    ///
    /// # Errors
    ///
    /// - `BookingError::Store` on any infrastructure failure; nothing was
    ///   written
    /// - `BookingError::ConflictRetriesExhausted` when every attempt lost a
    ///   race against concurrent writers
    #[instrument(
        name = "admit_booking",
        skip_all,
        fields(
            launchpad_id = %request.launchpad_id,
            launch_date = %request.launch_date,
            destination_id = %request.destination_id,
        )
    )]
    pub async fn handle(&self, request: AdmissionRequest) -> Result<AdmissionOutcome, BookingError> {
        // 1. Rules that need nothing but the request and today's date
        if let Err(rejection) = validate_request(&request, self.clock.today()) {
            info!(code = rejection.code(), "Booking rejected");
            return Ok(AdmissionOutcome::Rejected(rejection));
        }

        // 2. Check and write inside one transaction, rerun on conflict
        let request = &request;
        let outcome = with_conflict_retry("admit_booking", self.max_attempts, move |attempt| {
            self.attempt(request, attempt)
        })
        .await
        .map_err(|err| {
            error!(error = %err, "Booking admission failed");
            err
        })?;

        match &outcome {
            AdmissionOutcome::Admitted {
                booking_id,
                slot_id,
            } => info!(%booking_id, %slot_id, "Booking admitted"),
            AdmissionOutcome::Rejected(rejection) => {
                info!(code = rejection.code(), "Booking rejected")
            }
        }

        Ok(outcome)
    }

    async fn attempt(
        &self,
        request: &AdmissionRequest,
        attempt: u32,
    ) -> Result<AdmissionOutcome, DomainError> {
        let mut tx = self.store.begin().await?;

        match self.check_and_write(request, tx.as_mut()).await {
            Ok(AdmissionOutcome::Rejected(rejection)) => {
                tx.rollback().await?;
                Ok(AdmissionOutcome::Rejected(rejection))
            }
            Ok(admitted) => {
                // A failed commit ends the transaction without writing.
                tx.commit().await?;
                Ok(admitted)
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback().await {
                    error!(
                        attempt,
                        error = %rollback_err,
                        cause = %err,
                        "Rollback failed after admission error"
                    );
                }
                Err(err)
            }
        }
    }

    async fn check_and_write(
        &self,
        request: &AdmissionRequest,
        tx: &mut dyn ReservationTransaction,
    ) -> Result<AdmissionOutcome, DomainError> {
        let (launchpad_id, destination_id) = match self.checker.check(request, tx).await? {
            ConflictCheck::Clear {
                launchpad_id,
                destination_id,
            } => (launchpad_id, destination_id),
            ConflictCheck::Rejected(rejection) => return Ok(AdmissionOutcome::Rejected(rejection)),
        };

        let slot = ScheduledSlot::for_booking(SlotId::new(), launchpad_id, request.launch_date);

        match tx.insert_slot(&slot).await {
            Ok(()) => {}
            // Another writer took the day between our check and our insert.
            Err(err) if err.code == ErrorCode::SlotAlreadyTaken => {
                return Ok(AdmissionOutcome::Rejected(Rejection::LaunchpadBusy));
            }
            Err(err) => return Err(err),
        }

        let booking = Booking::admit(BookingId::new(), request, destination_id, &slot);
        tx.insert_booking(&booking).await?;

        Ok(AdmissionOutcome::Admitted {
            booking_id: booking.id,
            slot_id: slot.id,
        })
    }
}
