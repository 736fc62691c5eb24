//! In-Memory Reservation Store Adapter
//!
//! Keeps slots and bookings in memory for tests and database-less runs.
//!
//! ## Isolation
//!
//! A transaction takes the store lock at `begin` and holds it until it ends,
//! so transactions run one at a time. Writes go to a private copy of the
//! tables that replaces the shared tables on commit. The (launchpad, date)
//! uniqueness of slots is enforced on insert.
//!
//! Reader and feed-writer calls take the same lock: calling them while the
//! same task holds an open transaction deadlocks.
//!
//! ## Fault injection
//!
//! Failures can be switched on to exercise the caller's rollback paths:
//! booking inserts, the next commit, serialization conflicts on the next
//! N commits, and an unreachable store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::booking::{Booking, ScheduledSlot};
use crate::domain::foundation::{
    BookingId, DestinationId, DomainError, ErrorCode, IsoWeek, LaunchDate, LaunchpadId, SlotId,
};
use crate::ports::{BookingReader, FeedSlotWriter, ReservationStore, ReservationTransaction};

#[derive(Debug, Clone, Default)]
struct Tables {
    slots: HashMap<SlotId, ScheduledSlot>,
    bookings: HashMap<BookingId, Booking>,
}

impl Tables {
    fn day_taken(&self, launchpad_id: &LaunchpadId, date: LaunchDate) -> bool {
        self.slots
            .values()
            .any(|s| &s.launchpad_id == launchpad_id && s.date == date)
    }
}

#[derive(Debug, Default)]
struct Faults {
    unavailable: AtomicBool,
    fail_booking_inserts: AtomicBool,
    fail_next_commit: AtomicBool,
    conflicts_remaining: AtomicU32,
}

#[derive(Debug, Default)]
struct Counters {
    begun: AtomicU64,
    committed: AtomicU64,
    rolled_back: AtomicU64,
    failed_commits: AtomicU64,
    abandoned: AtomicU64,
}

/// Snapshot of transaction counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransactionStats {
    pub begun: u64,
    pub committed: u64,
    pub rolled_back: u64,
    /// Commits that failed; the transaction ended without writing.
    pub failed_commits: u64,
    /// Transactions dropped without commit or rollback.
    pub abandoned: u64,
    /// Transactions begun and not yet ended.
    pub open: u64,
}

/// In-memory implementation of the reservation ports.
#[derive(Debug, Clone, Default)]
pub struct InMemoryReservationStore {
    tables: Arc<Mutex<Tables>>,
    faults: Arc<Faults>,
    counters: Arc<Counters>,
}

impl InMemoryReservationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `begin` fail as if the store were unreachable.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.faults.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Make every booking insert fail.
    pub fn fail_booking_inserts(&self, fail: bool) {
        self.faults
            .fail_booking_inserts
            .store(fail, Ordering::SeqCst);
    }

    /// Make the next commit fail with a database error.
    pub fn fail_next_commit(&self) {
        self.faults.fail_next_commit.store(true, Ordering::SeqCst);
    }

    /// Make the next `count` commits fail with a serialization conflict.
    pub fn inject_conflicts(&self, count: u32) {
        self.faults
            .conflicts_remaining
            .store(count, Ordering::SeqCst);
    }

    /// Counters may move while the snapshot is taken. End counters are read
    /// before `begun`, so `begun` always covers every ended transaction.
    pub fn stats(&self) -> TransactionStats {
        let committed = self.counters.committed.load(Ordering::SeqCst);
        let rolled_back = self.counters.rolled_back.load(Ordering::SeqCst);
        let failed_commits = self.counters.failed_commits.load(Ordering::SeqCst);
        let abandoned = self.counters.abandoned.load(Ordering::SeqCst);
        let begun = self.counters.begun.load(Ordering::SeqCst);
        let ended = committed + rolled_back + failed_commits + abandoned;
        TransactionStats {
            begun,
            committed,
            rolled_back,
            failed_commits,
            abandoned,
            open: begun.saturating_sub(ended),
        }
    }

    /// All committed slots, ordered by date then launchpad.
    pub async fn slots(&self) -> Vec<ScheduledSlot> {
        let tables = self.tables.lock().await;
        let mut slots: Vec<_> = tables.slots.values().cloned().collect();
        slots.sort_by(|a, b| {
            (a.date, &a.launchpad_id).cmp(&(b.date, &b.launchpad_id))
        });
        slots
    }

    /// Remove all committed data (useful for tests).
    pub async fn clear(&self) {
        let mut tables = self.tables.lock().await;
        tables.slots.clear();
        tables.bookings.clear();
    }
}

#[async_trait]
impl ReservationStore for InMemoryReservationStore {
    async fn begin(&self) -> Result<Box<dyn ReservationTransaction>, DomainError> {
        if self.faults.unavailable.load(Ordering::SeqCst) {
            return Err(DomainError::database("Reservation store is unavailable"));
        }

        let guard = self.tables.clone().lock_owned().await;
        let working = guard.clone();
        self.counters.begun.fetch_add(1, Ordering::SeqCst);

        Ok(Box::new(InMemoryTransaction {
            guard: Some(guard),
            working,
            faults: self.faults.clone(),
            counters: self.counters.clone(),
        }))
    }

    async fn ping(&self) -> Result<(), DomainError> {
        if self.faults.unavailable.load(Ordering::SeqCst) {
            return Err(DomainError::database("Reservation store is unavailable"));
        }
        Ok(())
    }
}

#[async_trait]
impl BookingReader for InMemoryReservationStore {
    async fn list(&self) -> Result<Vec<Booking>, DomainError> {
        let tables = self.tables.lock().await;
        let mut bookings: Vec<_> = tables.bookings.values().cloned().collect();
        bookings.sort_by(|a, b| {
            (a.launch_date, a.created_at).cmp(&(b.launch_date, b.created_at))
        });
        Ok(bookings)
    }

    async fn find(&self, id: BookingId) -> Result<Option<Booking>, DomainError> {
        let tables = self.tables.lock().await;
        Ok(tables.bookings.get(&id).cloned())
    }
}

#[async_trait]
impl FeedSlotWriter for InMemoryReservationStore {
    async fn insert_feed_slot(&self, slot: &ScheduledSlot) -> Result<bool, DomainError> {
        let mut tables = self.tables.lock().await;

        let known = slot.external_id().is_some()
            && tables
                .slots
                .values()
                .any(|s| s.external_id() == slot.external_id());
        if known || tables.day_taken(&slot.launchpad_id, slot.date) {
            return Ok(false);
        }

        tables.slots.insert(slot.id, slot.clone());
        Ok(true)
    }
}

/// Transaction over a private copy of the tables.
struct InMemoryTransaction {
    /// `None` once the transaction has ended.
    guard: Option<OwnedMutexGuard<Tables>>,
    working: Tables,
    faults: Arc<Faults>,
    counters: Arc<Counters>,
}

impl InMemoryTransaction {
    fn tables(&mut self) -> Result<&mut Tables, DomainError> {
        if self.guard.is_none() {
            return Err(closed());
        }
        Ok(&mut self.working)
    }

    fn end(&mut self) -> Result<OwnedMutexGuard<Tables>, DomainError> {
        self.guard.take().ok_or_else(closed)
    }
}

fn closed() -> DomainError {
    DomainError::new(ErrorCode::TransactionClosed, "Transaction already ended")
}

impl Drop for InMemoryTransaction {
    fn drop(&mut self) {
        if self.guard.take().is_some() {
            self.counters.abandoned.fetch_add(1, Ordering::SeqCst);
        }
    }
}

#[async_trait]
impl ReservationTransaction for InMemoryTransaction {
    async fn slots_at_launchpad_and_date(
        &mut self,
        launchpad_id: &LaunchpadId,
        date: LaunchDate,
    ) -> Result<Vec<ScheduledSlot>, DomainError> {
        let tables = self.tables()?;
        Ok(tables
            .slots
            .values()
            .filter(|s| &s.launchpad_id == launchpad_id && s.date == date)
            .cloned()
            .collect())
    }

    async fn slots_at_launchpad_and_iso_week(
        &mut self,
        launchpad_id: &LaunchpadId,
        week: IsoWeek,
    ) -> Result<Vec<ScheduledSlot>, DomainError> {
        let tables = self.tables()?;
        Ok(tables
            .slots
            .values()
            .filter(|s| &s.launchpad_id == launchpad_id && s.iso_week == week)
            .cloned()
            .collect())
    }

    async fn destination_of_booking(
        &mut self,
        slot_id: SlotId,
    ) -> Result<Option<DestinationId>, DomainError> {
        let tables = self.tables()?;
        Ok(tables
            .bookings
            .values()
            .find(|b| b.slot_id == slot_id)
            .map(|b| b.destination_id))
    }

    async fn insert_slot(&mut self, slot: &ScheduledSlot) -> Result<(), DomainError> {
        let tables = self.tables()?;

        if tables.day_taken(&slot.launchpad_id, slot.date) {
            return Err(DomainError::new(
                ErrorCode::SlotAlreadyTaken,
                format!("Launchpad {} is occupied on {}", slot.launchpad_id, slot.date),
            ));
        }
        if tables.slots.contains_key(&slot.id) {
            return Err(DomainError::database(format!("Duplicate slot id {}", slot.id)));
        }

        tables.slots.insert(slot.id, slot.clone());
        Ok(())
    }

    async fn insert_booking(&mut self, booking: &Booking) -> Result<(), DomainError> {
        if self.faults.fail_booking_inserts.load(Ordering::SeqCst) {
            return Err(DomainError::database("Simulated booking insert failure"));
        }
        let tables = self.tables()?;

        if !tables.slots.contains_key(&booking.slot_id) {
            return Err(DomainError::database(format!(
                "Booking references unknown slot {}",
                booking.slot_id
            )));
        }
        if tables.bookings.values().any(|b| b.slot_id == booking.slot_id) {
            return Err(DomainError::database(format!(
                "Slot {} already has a booking",
                booking.slot_id
            )));
        }

        tables.bookings.insert(booking.id, booking.clone());
        Ok(())
    }

    async fn delete_booking(&mut self, id: BookingId) -> Result<Option<SlotId>, DomainError> {
        let tables = self.tables()?;
        Ok(tables.bookings.remove(&id).map(|b| b.slot_id))
    }

    async fn delete_slot(&mut self, id: SlotId) -> Result<bool, DomainError> {
        let tables = self.tables()?;
        Ok(tables.slots.remove(&id).is_some())
    }

    async fn commit(&mut self) -> Result<(), DomainError> {
        let mut guard = self.end()?;

        let conflicted = self
            .faults
            .conflicts_remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if conflicted {
            self.counters.failed_commits.fetch_add(1, Ordering::SeqCst);
            return Err(DomainError::new(
                ErrorCode::TransactionConflict,
                "Simulated serialization failure",
            ));
        }
        if self.faults.fail_next_commit.swap(false, Ordering::SeqCst) {
            self.counters.failed_commits.fetch_add(1, Ordering::SeqCst);
            return Err(DomainError::database("Simulated commit failure"));
        }

        *guard = std::mem::take(&mut self.working);
        self.counters.committed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn rollback(&mut self) -> Result<(), DomainError> {
        self.end()?;
        self.working = Tables::default();
        self.counters.rolled_back.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::booking::{AdmissionRequest, Gender, Passenger};
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn pad() -> LaunchpadId {
        LaunchpadId::new("pad-a").unwrap()
    }

    fn date(d: u32) -> LaunchDate {
        LaunchDate::from_ymd(2030, 6, d).unwrap()
    }

    fn booking_for(slot: &ScheduledSlot) -> Booking {
        let request = AdmissionRequest {
            passenger: Passenger::try_new(
                "Ada",
                "Lovelace",
                Gender::Female,
                NaiveDate::from_ymd_opt(1990, 12, 10).unwrap(),
            )
            .unwrap(),
            launchpad_id: slot.launchpad_id.to_string(),
            destination_id: Uuid::new_v4().to_string(),
            launch_date: slot.date,
        };
        Booking::admit(
            BookingId::new(),
            &request,
            DestinationId::from_uuid(Uuid::new_v4()),
            slot,
        )
    }

    #[tokio::test]
    async fn committed_writes_become_visible() {
        let store = InMemoryReservationStore::new();
        let slot = ScheduledSlot::for_booking(SlotId::new(), pad(), date(12));
        let booking = booking_for(&slot);

        let mut tx = store.begin().await.unwrap();
        tx.insert_slot(&slot).await.unwrap();
        tx.insert_booking(&booking).await.unwrap();
        tx.commit().await.unwrap();
        drop(tx);

        assert_eq!(store.slots().await, vec![slot]);
        assert_eq!(store.find(booking.id).await.unwrap(), Some(booking));
        assert_eq!(store.stats().committed, 1);
        assert_eq!(store.stats().open, 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn stats_stay_consistent_while_transactions_run() {
        let store = InMemoryReservationStore::new();

        let workers: Vec<_> = (0..4)
            .map(|n| {
                let store = store.clone();
                tokio::spawn(async move {
                    for i in 0..200 {
                        let mut tx = store.begin().await.unwrap();
                        if (n + i) % 2 == 0 {
                            tx.commit().await.unwrap();
                        } else {
                            tx.rollback().await.unwrap();
                        }
                    }
                })
            })
            .collect();

        while !workers.iter().all(|w| w.is_finished()) {
            let stats = store.stats();
            let ended =
                stats.committed + stats.rolled_back + stats.failed_commits + stats.abandoned;
            assert!(ended <= stats.begun, "{:?}", stats);
            tokio::task::yield_now().await;
        }
        for worker in workers {
            worker.await.unwrap();
        }

        let stats = store.stats();
        assert_eq!(stats.begun, 800);
        assert_eq!(stats.committed + stats.rolled_back, 800);
        assert_eq!(stats.open, 0);
    }

    #[tokio::test]
    async fn rollback_discards_writes() {
        let store = InMemoryReservationStore::new();
        let slot = ScheduledSlot::for_booking(SlotId::new(), pad(), date(12));

        let mut tx = store.begin().await.unwrap();
        tx.insert_slot(&slot).await.unwrap();
        tx.rollback().await.unwrap();
        drop(tx);

        assert!(store.slots().await.is_empty());
        assert_eq!(store.stats().rolled_back, 1);
    }

    #[tokio::test]
    async fn transaction_sees_its_own_writes() {
        let store = InMemoryReservationStore::new();
        let slot = ScheduledSlot::for_booking(SlotId::new(), pad(), date(12));

        let mut tx = store.begin().await.unwrap();
        tx.insert_slot(&slot).await.unwrap();

        let same_day = tx.slots_at_launchpad_and_date(&pad(), date(12)).await.unwrap();
        let same_week = tx
            .slots_at_launchpad_and_iso_week(&pad(), date(10).iso_week())
            .await
            .unwrap();
        tx.rollback().await.unwrap();

        assert_eq!(same_day.len(), 1);
        assert_eq!(same_week.len(), 1);
    }

    #[tokio::test]
    async fn second_slot_on_same_day_is_taken() {
        let store = InMemoryReservationStore::new();

        let mut tx = store.begin().await.unwrap();
        tx.insert_slot(&ScheduledSlot::for_booking(SlotId::new(), pad(), date(12)))
            .await
            .unwrap();
        let err = tx
            .insert_slot(&ScheduledSlot::for_booking(SlotId::new(), pad(), date(12)))
            .await
            .unwrap_err();
        tx.rollback().await.unwrap();

        assert_eq!(err.code, ErrorCode::SlotAlreadyTaken);
    }

    #[tokio::test]
    async fn booking_requires_its_slot() {
        let store = InMemoryReservationStore::new();
        let slot = ScheduledSlot::for_booking(SlotId::new(), pad(), date(12));

        let mut tx = store.begin().await.unwrap();
        let err = tx.insert_booking(&booking_for(&slot)).await.unwrap_err();
        tx.rollback().await.unwrap();

        assert_eq!(err.code, ErrorCode::DatabaseError);
    }

    #[tokio::test]
    async fn delete_booking_returns_its_slot() {
        let store = InMemoryReservationStore::new();
        let slot = ScheduledSlot::for_booking(SlotId::new(), pad(), date(12));
        let booking = booking_for(&slot);

        let mut tx = store.begin().await.unwrap();
        tx.insert_slot(&slot).await.unwrap();
        tx.insert_booking(&booking).await.unwrap();
        assert_eq!(tx.destination_of_booking(slot.id).await.unwrap(), Some(booking.destination_id));

        assert_eq!(tx.delete_booking(booking.id).await.unwrap(), Some(slot.id));
        assert_eq!(tx.delete_booking(booking.id).await.unwrap(), None);
        assert!(tx.delete_slot(slot.id).await.unwrap());
        assert!(!tx.delete_slot(slot.id).await.unwrap());
        tx.commit().await.unwrap();
    }

    #[tokio::test]
    async fn calls_after_end_are_rejected() {
        let store = InMemoryReservationStore::new();

        let mut tx = store.begin().await.unwrap();
        tx.commit().await.unwrap();

        let err = tx.rollback().await.unwrap_err();
        assert_eq!(err.code, ErrorCode::TransactionClosed);
        let err = tx
            .slots_at_launchpad_and_date(&pad(), date(12))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::TransactionClosed);
    }

    #[tokio::test]
    async fn dropped_transaction_is_abandoned_and_releases_the_lock() {
        let store = InMemoryReservationStore::new();

        {
            let mut tx = store.begin().await.unwrap();
            tx.insert_slot(&ScheduledSlot::for_booking(SlotId::new(), pad(), date(12)))
                .await
                .unwrap();
        }

        assert!(store.slots().await.is_empty());
        let stats = store.stats();
        assert_eq!(stats.abandoned, 1);
        assert_eq!(stats.open, 0);
    }

    #[tokio::test]
    async fn injected_conflicts_fail_commits_then_clear() {
        let store = InMemoryReservationStore::new();
        store.inject_conflicts(1);

        let mut tx = store.begin().await.unwrap();
        let err = tx.commit().await.unwrap_err();
        assert!(err.is_transaction_conflict());
        drop(tx);

        let mut tx = store.begin().await.unwrap();
        tx.commit().await.unwrap();

        let stats = store.stats();
        assert_eq!(stats.failed_commits, 1);
        assert_eq!(stats.committed, 1);
    }

    #[tokio::test]
    async fn feed_slots_are_deduplicated() {
        let store = InMemoryReservationStore::new();

        let first = ScheduledSlot::from_feed("ext-1", pad(), date(12));
        let same_external = ScheduledSlot::from_feed("ext-1", pad(), date(13));
        let same_day = ScheduledSlot::from_feed("ext-2", pad(), date(12));

        assert!(store.insert_feed_slot(&first).await.unwrap());
        assert!(!store.insert_feed_slot(&same_external).await.unwrap());
        assert!(!store.insert_feed_slot(&same_day).await.unwrap());
        assert_eq!(store.slots().await.len(), 1);
    }

    #[tokio::test]
    async fn unavailable_store_refuses_transactions() {
        let store = InMemoryReservationStore::new();
        store.set_unavailable(true);

        assert!(store.begin().await.is_err());
        assert!(store.ping().await.is_err());

        store.set_unavailable(false);
        assert!(store.ping().await.is_ok());
    }
}
