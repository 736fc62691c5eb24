//! Bounded rerun of store transactions aborted by a concurrent writer.

use std::future::Future;

use tracing::warn;

use crate::domain::booking::BookingError;
use crate::domain::foundation::DomainError;

/// Default number of attempts for a transaction that keeps conflicting.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Runs `attempt` until it succeeds, fails with anything other than
/// `TransactionConflict`, or `max_attempts` runs have conflicted.
///
/// Every attempt must open its own transaction; the closure receives the
/// 1-based attempt number.
pub(crate) async fn with_conflict_retry<T, F, Fut>(
    operation: &'static str,
    max_attempts: u32,
    mut attempt: F,
) -> Result<T, BookingError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, DomainError>>,
{
    let max_attempts = max_attempts.max(1);

    for n in 1..=max_attempts {
        match attempt(n).await {
            Err(err) if err.is_transaction_conflict() => {
                warn!(
                    operation,
                    attempt = n,
                    max_attempts,
                    error = %err,
                    "Transaction conflict, retrying"
                );
            }
            other => return other.map_err(BookingError::from),
        }
    }

    Err(BookingError::ConflictRetriesExhausted {
        attempts: max_attempts,
    })
}
