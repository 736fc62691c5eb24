//! Infrastructure failures of the booking engine.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | Store | 500 |
//! | ConflictRetriesExhausted | 500 |
//!
//! Business rejections are not errors; see [`super::Rejection`].

use thiserror::Error;

use crate::domain::foundation::DomainError;

/// Failures that prevented the engine from reaching a business decision.
///
/// Whatever transaction was open has been rolled back by the time one of
/// these is returned.
#[derive(Debug, Clone, Error)]
pub enum BookingError {
    /// The reservation store failed; carries the underlying cause.
    #[error("reservation store failure: {0}")]
    Store(#[from] DomainError),

    /// Every attempt was aborted by a concurrent transaction.
    #[error("transaction conflicted with concurrent bookings on all {attempts} attempts")]
    ConflictRetriesExhausted { attempts: u32 },
}
