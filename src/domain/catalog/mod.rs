//! Catalog module - launchpads and destinations.
//!
//! The catalog is owned by the import side; the booking domain only reads it.

mod launchpad;

pub use launchpad::{Launchpad, LaunchpadStatus};

use serde::{Deserialize, Serialize};

use crate::domain::foundation::DestinationId;

/// A destination passengers can book a flight to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
    pub id: DestinationId,
    pub name: String,
}

impl Destination {
    pub fn new(id: DestinationId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}
