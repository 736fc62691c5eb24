//! CancelBookingHandler - removes a booking and frees its slot.

use std::sync::Arc;

use tracing::{error, info, instrument, warn};

use crate::domain::booking::BookingError;
use crate::domain::foundation::{BookingId, DomainError};
use crate::ports::{ReservationStore, ReservationTransaction};

use super::retry::{with_conflict_retry, DEFAULT_MAX_ATTEMPTS};

/// Command to cancel a booking.
#[derive(Debug, Clone)]
pub struct CancelBookingCommand {
    pub booking_id: BookingId,
}

/// Result of a cancellation.
///
/// Cancelling an unknown id is not an error; `removed` is `false` then.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CancelBookingResult {
    pub booking_id: BookingId,
    pub removed: bool,
}

/// Handler for cancelling bookings.
///
/// The booking and the slot it references are deleted in one transaction,
/// so a freed day is immediately bookable again.
pub struct CancelBookingHandler {
    store: Arc<dyn ReservationStore>,
    max_attempts: u32,
}

impl CancelBookingHandler {
    pub fn new(store: Arc<dyn ReservationStore>) -> Self {
        Self {
            store,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    #[instrument(name = "cancel_booking", skip_all, fields(booking_id = %cmd.booking_id))]
    pub async fn handle(
        &self,
        cmd: CancelBookingCommand,
    ) -> Result<CancelBookingResult, BookingError> {
        let booking_id = cmd.booking_id;
        let removed = with_conflict_retry("cancel_booking", self.max_attempts, move |_| {
            self.attempt(booking_id)
        })
        .await
        .map_err(|err| {
            error!(error = %err, "Booking cancellation failed");
            err
        })?;

        if removed {
            info!("Booking cancelled");
        } else {
            info!("No booking to cancel");
        }

        Ok(CancelBookingResult {
            booking_id,
            removed,
        })
    }

    async fn attempt(&self, booking_id: BookingId) -> Result<bool, DomainError> {
        let mut tx = self.store.begin().await?;

        match remove(tx.as_mut(), booking_id).await {
            Ok(removed) => {
                tx.commit().await?;
                Ok(removed)
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback().await {
                    error!(
                        error = %rollback_err,
                        cause = %err,
                        "Rollback failed after cancellation error"
                    );
                }
                Err(err)
            }
        }
    }
}

async fn remove(
    tx: &mut dyn ReservationTransaction,
    booking_id: BookingId,
) -> Result<bool, DomainError> {
    let Some(slot_id) = tx.delete_booking(booking_id).await? else {
        return Ok(false);
    };

    if !tx.delete_slot(slot_id).await? {
        warn!(%slot_id, "Booking referenced a slot that no longer exists");
    }

    Ok(true)
}
