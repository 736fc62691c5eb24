//! Booking reader port (read side).
//!
//! Queries outside the admission transaction, used by listing endpoints.

use async_trait::async_trait;

use crate::domain::booking::Booking;
use crate::domain::foundation::{BookingId, DomainError};

#[async_trait]
pub trait BookingReader: Send + Sync {
    /// All bookings ordered by launch date, then creation time.
    async fn list(&self) -> Result<Vec<Booking>, DomainError>;

    /// Find a booking by id. Returns `None` if not found.
    async fn find(&self, id: BookingId) -> Result<Option<Booking>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn booking_reader_is_object_safe() {
        fn _accepts_dyn(_reader: &dyn BookingReader) {}
    }
}
