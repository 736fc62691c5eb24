//! Scheduled slot - an occupied (launchpad, date) pair.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{IsoWeek, LaunchDate, LaunchpadId, SlotId};

/// Where a slot came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SlotSource {
    /// Created together with a passenger booking.
    Booking,
    /// Ingested from the launch feed; has no passenger.
    Feed { external_id: String },
}

/// A launchpad occupied on a given day.
///
/// The ISO week is derived from the date at construction and stored with
/// the slot so week-range lookups need no date arithmetic in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledSlot {
    pub id: SlotId,
    pub launchpad_id: LaunchpadId,
    pub date: LaunchDate,
    pub iso_week: IsoWeek,
    pub source: SlotSource,
}

impl ScheduledSlot {
    /// Slot backing a passenger booking.
    pub fn for_booking(id: SlotId, launchpad_id: LaunchpadId, date: LaunchDate) -> Self {
        Self {
            id,
            launchpad_id,
            iso_week: date.iso_week(),
            date,
            source: SlotSource::Booking,
        }
    }

    /// Slot ingested from the launch feed.
    pub fn from_feed(
        external_id: impl Into<String>,
        launchpad_id: LaunchpadId,
        date: LaunchDate,
    ) -> Self {
        Self {
            id: SlotId::new(),
            launchpad_id,
            iso_week: date.iso_week(),
            date,
            source: SlotSource::Feed {
                external_id: external_id.into(),
            },
        }
    }

    pub fn external_id(&self) -> Option<&str> {
        match &self.source {
            SlotSource::Feed { external_id } => Some(external_id),
            SlotSource::Booking => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pad() -> LaunchpadId {
        LaunchpadId::new("LP1").unwrap()
    }

    #[test]
    fn booking_slot_derives_iso_week() {
        let date = LaunchDate::from_ymd(2030, 6, 12).unwrap();
        let slot = ScheduledSlot::for_booking(SlotId::new(), pad(), date);
        assert_eq!(slot.iso_week, IsoWeek::new(2030, 24).unwrap());
        assert_eq!(slot.source, SlotSource::Booking);
        assert_eq!(slot.external_id(), None);
    }

    #[test]
    fn feed_slot_keeps_external_id() {
        let date = LaunchDate::from_ymd(2030, 1, 1).unwrap();
        let slot = ScheduledSlot::from_feed("62dd70d5202306255024d139", pad(), date);
        assert_eq!(slot.external_id(), Some("62dd70d5202306255024d139"));
        assert_eq!(slot.iso_week, IsoWeek::new(2030, 1).unwrap());
    }
}
