//! Translation of sqlx errors into domain errors.

use crate::domain::foundation::{DomainError, ErrorCode};

/// Unique constraint on `scheduled_slots (launchpad_id, launch_date)`.
pub(crate) const SLOT_DAY_CONSTRAINT: &str = "scheduled_slots_launchpad_date_key";

/// SQLSTATE codes for transactions aborted by concurrent writers.
const SERIALIZATION_FAILURE: &str = "40001";
const DEADLOCK_DETECTED: &str = "40P01";

/// Maps a sqlx error, keeping the codes admission reacts to.
///
/// - serialization failures and deadlocks → `TransactionConflict`
/// - unique violation of the slot day constraint → `SlotAlreadyTaken`
/// - anything else → `DatabaseError` prefixed with `context`
pub(crate) fn map_db_error(context: &str, err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err {
        if let Some(code) = db_err.code() {
            if code == SERIALIZATION_FAILURE || code == DEADLOCK_DETECTED {
                return DomainError::new(
                    ErrorCode::TransactionConflict,
                    format!("{}: {}", context, db_err.message()),
                )
                .with_detail("sqlstate", code.to_string());
            }
        }
        if db_err.is_unique_violation() && db_err.constraint() == Some(SLOT_DAY_CONSTRAINT) {
            return DomainError::new(
                ErrorCode::SlotAlreadyTaken,
                "Launchpad is already occupied on that date",
            );
        }
    }
    DomainError::new(ErrorCode::DatabaseError, format!("{}: {}", context, err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_database_errors_are_database_errors() {
        let err = map_db_error("Failed to load slots", sqlx::Error::RowNotFound);
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert!(err.message.starts_with("Failed to load slots"));
    }

    #[test]
    fn pool_timeout_is_not_a_conflict() {
        let err = map_db_error("Failed to begin transaction", sqlx::Error::PoolTimedOut);
        assert!(!err.is_transaction_conflict());
    }
}
