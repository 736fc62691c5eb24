//! ListBookingsHandler - Query handler for all bookings.

use std::sync::Arc;

use crate::domain::booking::{Booking, BookingError};
use crate::ports::BookingReader;

/// Query for all bookings.
#[derive(Debug, Clone, Default)]
pub struct ListBookingsQuery;

/// Handler for listing bookings, ordered by launch date.
pub struct ListBookingsHandler {
    reader: Arc<dyn BookingReader>,
}

impl ListBookingsHandler {
    pub fn new(reader: Arc<dyn BookingReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(&self, _query: ListBookingsQuery) -> Result<Vec<Booking>, BookingError> {
        Ok(self.reader.list().await?)
    }
}
