//! PostgreSQL implementation of the reservation ports.
//!
//! Every admission transaction runs at SERIALIZABLE isolation. Two requests
//! that read the same launchpad's slots and then insert cannot both commit:
//! PostgreSQL aborts one with SQLSTATE 40001, reported as
//! `TransactionConflict` so the caller reruns it. The unique constraint on
//! `(launchpad_id, launch_date)` backs the same-day rule independently of
//! isolation.
//!
//! The transaction also answers the catalog checks, so launchpad status and
//! destination existence come from the same snapshot as the slots.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::domain::booking::{Booking, Gender, Passenger, ScheduledSlot, SlotSource};
use crate::domain::catalog::LaunchpadStatus;
use crate::domain::foundation::{
    BookingId, DestinationId, DomainError, ErrorCode, IsoWeek, LaunchDate, LaunchpadId, SlotId,
    Timestamp,
};
use crate::ports::{BookingReader, FeedSlotWriter, ReservationStore, ReservationTransaction};

use super::catalog::{DESTINATION_EXISTS_SQL, LAUNCHPAD_ACTIVE_SQL};
use super::errors::map_db_error;

/// PostgreSQL implementation of `ReservationStore`, `BookingReader` and
/// `FeedSlotWriter`.
#[derive(Clone)]
pub struct PostgresReservationStore {
    pool: PgPool,
}

impl PostgresReservationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Rows
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, sqlx::FromRow)]
struct SlotRow {
    id: Uuid,
    launchpad_id: String,
    launch_date: NaiveDate,
    iso_year: i32,
    iso_week: i32,
    external_id: Option<String>,
}

impl TryFrom<SlotRow> for ScheduledSlot {
    type Error = DomainError;

    fn try_from(row: SlotRow) -> Result<Self, Self::Error> {
        let launchpad_id = LaunchpadId::new(row.launchpad_id).map_err(corrupt)?;
        let date = LaunchDate::new(row.launch_date);

        let stored_week = u32::try_from(row.iso_week)
            .map_err(|_| corrupt(format!("Invalid iso_week {}", row.iso_week)))
            .and_then(|week| IsoWeek::new(row.iso_year, week).map_err(corrupt))?;
        if stored_week != date.iso_week() {
            return Err(corrupt(format!(
                "Slot {} stores week {} for date {}",
                row.id, stored_week, date
            )));
        }

        let slot = match row.external_id {
            Some(external_id) => ScheduledSlot {
                id: SlotId::from_uuid(row.id),
                launchpad_id,
                date,
                iso_week: stored_week,
                source: SlotSource::Feed { external_id },
            },
            None => ScheduledSlot::for_booking(SlotId::from_uuid(row.id), launchpad_id, date),
        };
        Ok(slot)
    }
}

#[derive(Debug, sqlx::FromRow)]
struct BookingRow {
    id: Uuid,
    first_name: String,
    last_name: String,
    gender: String,
    birthday: NaiveDate,
    launchpad_id: String,
    destination_id: Uuid,
    launch_date: NaiveDate,
    slot_id: Uuid,
    created_at: DateTime<Utc>,
}

impl TryFrom<BookingRow> for Booking {
    type Error = DomainError;

    fn try_from(row: BookingRow) -> Result<Self, Self::Error> {
        let gender = Gender::parse(&row.gender).map_err(corrupt)?;
        let passenger =
            Passenger::try_new(row.first_name, row.last_name, gender, row.birthday).map_err(corrupt)?;

        Ok(Booking {
            id: BookingId::from_uuid(row.id),
            passenger,
            destination_id: DestinationId::from_uuid(row.destination_id),
            launchpad_id: LaunchpadId::new(row.launchpad_id).map_err(corrupt)?,
            launch_date: LaunchDate::new(row.launch_date),
            slot_id: SlotId::from_uuid(row.slot_id),
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

fn corrupt(err: impl std::fmt::Display) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("Invalid stored row: {}", err))
}

const SLOT_COLUMNS: &str = "id, launchpad_id, launch_date, iso_year, iso_week, external_id";

const BOOKING_COLUMNS: &str = "id, first_name, last_name, gender, birthday, launchpad_id, \
     destination_id, launch_date, slot_id, created_at";

fn slots_from_rows(rows: Vec<SlotRow>) -> Result<Vec<ScheduledSlot>, DomainError> {
    rows.into_iter().map(ScheduledSlot::try_from).collect()
}

// ════════════════════════════════════════════════════════════════════════════
// Store
// ════════════════════════════════════════════════════════════════════════════

#[async_trait]
impl ReservationStore for PostgresReservationStore {
    async fn begin(&self) -> Result<Box<dyn ReservationTransaction>, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_db_error("Failed to begin transaction", e))?;

        sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
            .execute(&mut *tx)
            .await
            .map_err(|e| map_db_error("Failed to set isolation level", e))?;

        Ok(Box::new(PostgresReservationTransaction { tx: Some(tx) }))
    }

    async fn ping(&self) -> Result<(), DomainError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| map_db_error("Database ping failed", e))?;
        Ok(())
    }
}

#[async_trait]
impl BookingReader for PostgresReservationStore {
    async fn list(&self) -> Result<Vec<Booking>, DomainError> {
        let rows: Vec<BookingRow> = sqlx::query_as(&format!(
            "SELECT {} FROM bookings ORDER BY launch_date, created_at",
            BOOKING_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_db_error("Failed to list bookings", e))?;

        rows.into_iter().map(Booking::try_from).collect()
    }

    async fn find(&self, id: BookingId) -> Result<Option<Booking>, DomainError> {
        let row: Option<BookingRow> = sqlx::query_as(&format!(
            "SELECT {} FROM bookings WHERE id = $1",
            BOOKING_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_db_error("Failed to find booking", e))?;

        row.map(Booking::try_from).transpose()
    }
}

#[async_trait]
impl FeedSlotWriter for PostgresReservationStore {
    async fn insert_feed_slot(&self, slot: &ScheduledSlot) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO scheduled_slots (id, launchpad_id, launch_date, iso_year, iso_week, external_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(slot.id.as_uuid())
        .bind(slot.launchpad_id.as_str())
        .bind(slot.date.as_naive())
        .bind(slot.iso_week.year)
        .bind(slot.iso_week.week as i32)
        .bind(slot.external_id())
        .execute(&self.pool)
        .await
        .map_err(|e| map_db_error("Failed to insert feed slot", e))?;

        Ok(result.rows_affected() == 1)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Transaction
// ════════════════════════════════════════════════════════════════════════════

/// Open SERIALIZABLE transaction. Dropping it unfinished rolls back.
pub struct PostgresReservationTransaction {
    /// `None` once committed or rolled back.
    tx: Option<Transaction<'static, Postgres>>,
}

impl PostgresReservationTransaction {
    fn conn(&mut self) -> Result<&mut Transaction<'static, Postgres>, DomainError> {
        self.tx.as_mut().ok_or_else(|| {
            DomainError::new(ErrorCode::TransactionClosed, "Transaction already ended")
        })
    }

    fn end(&mut self) -> Result<Transaction<'static, Postgres>, DomainError> {
        self.tx.take().ok_or_else(|| {
            DomainError::new(ErrorCode::TransactionClosed, "Transaction already ended")
        })
    }
}

#[async_trait]
impl ReservationTransaction for PostgresReservationTransaction {
    async fn slots_at_launchpad_and_date(
        &mut self,
        launchpad_id: &LaunchpadId,
        date: LaunchDate,
    ) -> Result<Vec<ScheduledSlot>, DomainError> {
        let tx = self.conn()?;
        let rows: Vec<SlotRow> = sqlx::query_as(&format!(
            "SELECT {} FROM scheduled_slots WHERE launchpad_id = $1 AND launch_date = $2",
            SLOT_COLUMNS
        ))
        .bind(launchpad_id.as_str())
        .bind(date.as_naive())
        .fetch_all(&mut **tx)
        .await
        .map_err(|e| map_db_error("Failed to load slots for date", e))?;

        slots_from_rows(rows)
    }

    async fn slots_at_launchpad_and_iso_week(
        &mut self,
        launchpad_id: &LaunchpadId,
        week: IsoWeek,
    ) -> Result<Vec<ScheduledSlot>, DomainError> {
        let tx = self.conn()?;
        let rows: Vec<SlotRow> = sqlx::query_as(&format!(
            "SELECT {} FROM scheduled_slots \
             WHERE launchpad_id = $1 AND iso_year = $2 AND iso_week = $3 \
             ORDER BY launch_date",
            SLOT_COLUMNS
        ))
        .bind(launchpad_id.as_str())
        .bind(week.year)
        .bind(week.week as i32)
        .fetch_all(&mut **tx)
        .await
        .map_err(|e| map_db_error("Failed to load slots for week", e))?;

        slots_from_rows(rows)
    }

    async fn destination_of_booking(
        &mut self,
        slot_id: SlotId,
    ) -> Result<Option<DestinationId>, DomainError> {
        let tx = self.conn()?;
        let destination: Option<Uuid> =
            sqlx::query_scalar("SELECT destination_id FROM bookings WHERE slot_id = $1")
                .bind(slot_id.as_uuid())
                .fetch_optional(&mut **tx)
                .await
                .map_err(|e| map_db_error("Failed to load booking destination", e))?;

        Ok(destination.map(DestinationId::from_uuid))
    }

    async fn launchpad_is_active(
        &mut self,
        launchpad_id: &LaunchpadId,
    ) -> Result<Option<bool>, DomainError> {
        let tx = self.conn()?;
        let active = sqlx::query_scalar::<_, bool>(LAUNCHPAD_ACTIVE_SQL)
            .bind(launchpad_id.as_str())
            .bind(LaunchpadStatus::Active.as_str())
            .fetch_one(&mut **tx)
            .await
            .map_err(|e| map_db_error("Failed to check launchpad", e))?;

        Ok(Some(active))
    }

    async fn destination_exists(
        &mut self,
        destination_id: &DestinationId,
    ) -> Result<Option<bool>, DomainError> {
        let tx = self.conn()?;
        let exists = sqlx::query_scalar::<_, bool>(DESTINATION_EXISTS_SQL)
            .bind(destination_id.as_uuid())
            .fetch_one(&mut **tx)
            .await
            .map_err(|e| map_db_error("Failed to check destination", e))?;

        Ok(Some(exists))
    }

    async fn insert_slot(&mut self, slot: &ScheduledSlot) -> Result<(), DomainError> {
        let tx = self.conn()?;
        sqlx::query(
            r#"
            INSERT INTO scheduled_slots (id, launchpad_id, launch_date, iso_year, iso_week, external_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(slot.id.as_uuid())
        .bind(slot.launchpad_id.as_str())
        .bind(slot.date.as_naive())
        .bind(slot.iso_week.year)
        .bind(slot.iso_week.week as i32)
        .bind(slot.external_id())
        .execute(&mut **tx)
        .await
        .map_err(|e| map_db_error("Failed to insert slot", e))?;

        Ok(())
    }

    async fn insert_booking(&mut self, booking: &Booking) -> Result<(), DomainError> {
        let tx = self.conn()?;
        sqlx::query(
            r#"
            INSERT INTO bookings (
                id, first_name, last_name, gender, birthday, launchpad_id,
                destination_id, launch_date, slot_id, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(booking.id.as_uuid())
        .bind(&booking.passenger.first_name)
        .bind(&booking.passenger.last_name)
        .bind(booking.passenger.gender.as_str())
        .bind(booking.passenger.birthday)
        .bind(booking.launchpad_id.as_str())
        .bind(booking.destination_id.as_uuid())
        .bind(booking.launch_date.as_naive())
        .bind(booking.slot_id.as_uuid())
        .bind(booking.created_at.as_datetime())
        .execute(&mut **tx)
        .await
        .map_err(|e| map_db_error("Failed to insert booking", e))?;

        Ok(())
    }

    async fn delete_booking(&mut self, id: BookingId) -> Result<Option<SlotId>, DomainError> {
        let tx = self.conn()?;
        let slot_id: Option<Uuid> =
            sqlx::query_scalar("DELETE FROM bookings WHERE id = $1 RETURNING slot_id")
                .bind(id.as_uuid())
                .fetch_optional(&mut **tx)
                .await
                .map_err(|e| map_db_error("Failed to delete booking", e))?;

        Ok(slot_id.map(SlotId::from_uuid))
    }

    async fn delete_slot(&mut self, id: SlotId) -> Result<bool, DomainError> {
        let tx = self.conn()?;
        let result = sqlx::query("DELETE FROM scheduled_slots WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&mut **tx)
            .await
            .map_err(|e| map_db_error("Failed to delete slot", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn commit(&mut self) -> Result<(), DomainError> {
        self.end()?
            .commit()
            .await
            .map_err(|e| map_db_error("Failed to commit transaction", e))
    }

    async fn rollback(&mut self) -> Result<(), DomainError> {
        self.end()?
            .rollback()
            .await
            .map_err(|e| map_db_error("Failed to roll back transaction", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot_row(launch_date: NaiveDate, iso_year: i32, iso_week: i32) -> SlotRow {
        SlotRow {
            id: Uuid::new_v4(),
            launchpad_id: "5e9e4502f509094188566f88".to_string(),
            launch_date,
            iso_year,
            iso_week,
            external_id: None,
        }
    }

    #[test]
    fn booking_slot_row_converts() {
        let row = slot_row(NaiveDate::from_ymd_opt(2030, 6, 12).unwrap(), 2030, 24);
        let id = row.id;

        let slot = ScheduledSlot::try_from(row).unwrap();

        assert_eq!(slot.id, SlotId::from_uuid(id));
        assert_eq!(slot.source, SlotSource::Booking);
        assert_eq!(slot.iso_week, IsoWeek::new(2030, 24).unwrap());
    }

    #[test]
    fn feed_slot_row_keeps_external_id() {
        let mut row = slot_row(NaiveDate::from_ymd_opt(2027, 1, 1).unwrap(), 2026, 53);
        row.external_id = Some("5fe3af58b3467846b324215f".to_string());

        let slot = ScheduledSlot::try_from(row).unwrap();

        assert_eq!(slot.external_id(), Some("5fe3af58b3467846b324215f"));
    }

    #[test]
    fn mismatched_stored_week_is_rejected() {
        let row = slot_row(NaiveDate::from_ymd_opt(2030, 6, 12).unwrap(), 2030, 25);

        let err = ScheduledSlot::try_from(row).unwrap_err();

        assert_eq!(err.code, ErrorCode::DatabaseError);
    }

    #[test]
    fn booking_row_with_unknown_gender_is_rejected() {
        let row = BookingRow {
            id: Uuid::new_v4(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            gender: "Other".to_string(),
            birthday: NaiveDate::from_ymd_opt(1990, 12, 10).unwrap(),
            launchpad_id: "pad-a".to_string(),
            destination_id: Uuid::new_v4(),
            launch_date: NaiveDate::from_ymd_opt(2030, 6, 12).unwrap(),
            slot_id: Uuid::new_v4(),
            created_at: Utc::now(),
        };

        assert!(Booking::try_from(row).is_err());
    }
}
