//! Booking - a passenger's confirmed reservation.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    BookingId, DestinationId, LaunchDate, LaunchpadId, SlotId, Timestamp,
};

use super::{AdmissionRequest, Passenger, ScheduledSlot};

/// A confirmed reservation, always paired with exactly one scheduled slot.
///
/// The pairing is the explicit `slot_id` reference. Both records are
/// written and removed in the same store transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: BookingId,
    pub passenger: Passenger,
    pub destination_id: DestinationId,
    pub launchpad_id: LaunchpadId,
    pub launch_date: LaunchDate,
    pub slot_id: SlotId,
    pub created_at: Timestamp,
}

impl Booking {
    /// Builds the booking for an admitted request and the slot it occupies.
    pub fn admit(
        id: BookingId,
        request: &AdmissionRequest,
        destination_id: DestinationId,
        slot: &ScheduledSlot,
    ) -> Self {
        Self {
            id,
            passenger: request.passenger.clone(),
            destination_id,
            launchpad_id: slot.launchpad_id.clone(),
            launch_date: slot.date,
            slot_id: slot.id,
            created_at: Timestamp::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::booking::Gender;
    use chrono::NaiveDate;
    use uuid::Uuid;

    #[test]
    fn admitted_booking_references_its_slot() {
        let request = AdmissionRequest {
            passenger: Passenger::try_new(
                "Yuri",
                "Gagarin",
                Gender::Male,
                NaiveDate::from_ymd_opt(1934, 3, 9).unwrap(),
            )
            .unwrap(),
            launchpad_id: "LP1".to_string(),
            destination_id: Uuid::new_v4().to_string(),
            launch_date: LaunchDate::from_ymd(2030, 6, 10).unwrap(),
        };
        let slot = ScheduledSlot::for_booking(
            SlotId::new(),
            LaunchpadId::new("LP1").unwrap(),
            request.launch_date,
        );
        let destination = DestinationId::from_uuid(Uuid::new_v4());

        let booking = Booking::admit(BookingId::new(), &request, destination, &slot);

        assert_eq!(booking.slot_id, slot.id);
        assert_eq!(booking.launchpad_id, slot.launchpad_id);
        assert_eq!(booking.launch_date, slot.date);
        assert_eq!(booking.destination_id, destination);
        assert_eq!(booking.passenger.last_name, "Gagarin");
    }
}
