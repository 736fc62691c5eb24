//! Reservation store port - transactional access to slots and bookings.
//!
//! The admission engine drives every read and write of scheduled slots and
//! bookings through a [`ReservationTransaction`], so conflict checks and the
//! inserts they guard observe one consistent view of the store.
//!
//! # Isolation contract
//!
//! Implementations must make concurrent check-then-insert sequences safe:
//!
//! - Two transactions that both read the same launchpad's slots and then
//!   insert must not both commit. An implementation either serializes
//!   such transactions or aborts one of them, reporting
//!   `ErrorCode::TransactionConflict` so the caller can rerun it.
//! - Inserting a second slot for an existing (launchpad, date) pair must
//!   fail with `ErrorCode::SlotAlreadyTaken`.
//!
//! # Lifecycle
//!
//! A transaction ends with exactly one call to `commit` or `rollback`.
//! Any call after that fails with `ErrorCode::TransactionClosed`.
//! Dropping an unfinished transaction discards its writes.
//!
//! # Example
//!
//! ```ignore
//! let mut tx = store.begin().await?;
//! if !tx.slots_at_launchpad_and_date(&launchpad_id, date).await?.is_empty() {
//!     tx.rollback().await?;
//!     return Ok(AdmissionOutcome::Rejected(Rejection::LaunchpadBusy));
//! }
//! tx.insert_slot(&slot).await?;
//! tx.insert_booking(&booking).await?;
//! tx.commit().await?;
//! ```

use async_trait::async_trait;

use crate::domain::booking::{Booking, ScheduledSlot};
use crate::domain::foundation::{
    BookingId, DestinationId, DomainError, IsoWeek, LaunchDate, LaunchpadId, SlotId,
};

/// Entry point to the reservation store.
#[async_trait]
pub trait ReservationStore: Send + Sync {
    /// Open a new transaction.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` if the store is unreachable
    async fn begin(&self) -> Result<Box<dyn ReservationTransaction>, DomainError>;

    /// Cheap reachability check for health endpoints.
    async fn ping(&self) -> Result<(), DomainError> {
        Ok(())
    }
}

/// Operations available inside an open transaction.
#[async_trait]
pub trait ReservationTransaction: Send {
    /// Slots occupying the launchpad on exactly this date.
    async fn slots_at_launchpad_and_date(
        &mut self,
        launchpad_id: &LaunchpadId,
        date: LaunchDate,
    ) -> Result<Vec<ScheduledSlot>, DomainError>;

    /// Slots occupying the launchpad anywhere in the given ISO week.
    async fn slots_at_launchpad_and_iso_week(
        &mut self,
        launchpad_id: &LaunchpadId,
        week: IsoWeek,
    ) -> Result<Vec<ScheduledSlot>, DomainError>;

    /// Destination of the booking that references this slot.
    ///
    /// Returns `None` for slots without a booking (feed launches); that is
    /// not an error.
    async fn destination_of_booking(
        &mut self,
        slot_id: SlotId,
    ) -> Result<Option<DestinationId>, DomainError>;

    /// Whether the launchpad exists and is active, read on this
    /// transaction's snapshot.
    ///
    /// `None` when the store does not hold the catalog; callers then ask
    /// the catalog port.
    async fn launchpad_is_active(
        &mut self,
        _launchpad_id: &LaunchpadId,
    ) -> Result<Option<bool>, DomainError> {
        Ok(None)
    }

    /// Whether the destination exists, read on this transaction's snapshot.
    ///
    /// `None` when the store does not hold the catalog.
    async fn destination_exists(
        &mut self,
        _destination_id: &DestinationId,
    ) -> Result<Option<bool>, DomainError> {
        Ok(None)
    }

    /// # Errors
    ///
    /// - `SlotAlreadyTaken` if the (launchpad, date) pair is occupied
    /// - `TransactionConflict` if a concurrent transaction won the race
    async fn insert_slot(&mut self, slot: &ScheduledSlot) -> Result<(), DomainError>;

    async fn insert_booking(&mut self, booking: &Booking) -> Result<(), DomainError>;

    /// Delete a booking, returning the slot it referenced.
    ///
    /// Returns `None` when no booking has this id.
    async fn delete_booking(&mut self, id: BookingId) -> Result<Option<SlotId>, DomainError>;

    /// Delete a slot. Returns `false` when it did not exist.
    async fn delete_slot(&mut self, id: SlotId) -> Result<bool, DomainError>;

    /// Make all writes of this transaction durable and visible.
    ///
    /// # Errors
    ///
    /// - `TransactionConflict` if the store aborted the commit
    /// - `DatabaseError` on any other failure; nothing was written
    async fn commit(&mut self) -> Result<(), DomainError>;

    /// Discard all writes of this transaction.
    async fn rollback(&mut self) -> Result<(), DomainError>;
}
