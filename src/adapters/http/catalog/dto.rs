//! Data Transfer Objects for catalog endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::catalog::{Destination, Launchpad, LaunchpadStatus};
use crate::domain::foundation::{DestinationId, LaunchpadId};

/// A launchpad accepting bookings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaunchpadResponse {
    pub id: LaunchpadId,
    pub name: String,
    pub status: LaunchpadStatus,
}

impl From<Launchpad> for LaunchpadResponse {
    fn from(launchpad: Launchpad) -> Self {
        Self {
            id: launchpad.id,
            name: launchpad.name,
            status: launchpad.status,
        }
    }
}

/// A bookable destination.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DestinationResponse {
    pub id: DestinationId,
    pub name: String,
}

impl From<Destination> for DestinationResponse {
    fn from(destination: Destination) -> Self {
        Self {
            id: destination.id,
            name: destination.name,
        }
    }
}
