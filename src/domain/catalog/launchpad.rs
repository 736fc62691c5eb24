//! Launchpad catalog entry.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::LaunchpadId;

/// Operational status reported by the launch catalog feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LaunchpadStatus {
    Active,
    Inactive,
    Retired,
    Lost,
    UnderConstruction,
    Unknown,
}

impl LaunchpadStatus {
    /// Parses the feed's status string.
    ///
    /// Unrecognized values map to `Unknown` so a new feed status can never
    /// make a launchpad bookable.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "active" => LaunchpadStatus::Active,
            "inactive" => LaunchpadStatus::Inactive,
            "retired" => LaunchpadStatus::Retired,
            "lost" => LaunchpadStatus::Lost,
            "under construction" | "under_construction" => LaunchpadStatus::UnderConstruction,
            _ => LaunchpadStatus::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LaunchpadStatus::Active => "active",
            LaunchpadStatus::Inactive => "inactive",
            LaunchpadStatus::Retired => "retired",
            LaunchpadStatus::Lost => "lost",
            LaunchpadStatus::UnderConstruction => "under construction",
            LaunchpadStatus::Unknown => "unknown",
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, LaunchpadStatus::Active)
    }
}

impl fmt::Display for LaunchpadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A launchpad known to the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Launchpad {
    pub id: LaunchpadId,
    pub name: String,
    pub status: LaunchpadStatus,
}

impl Launchpad {
    pub fn new(id: LaunchpadId, name: impl Into<String>, status: LaunchpadStatus) -> Self {
        Self {
            id,
            name: name.into(),
            status,
        }
    }

    /// Whether bookings may currently be admitted on this launchpad.
    pub fn accepts_bookings(&self) -> bool {
        self.status.is_active()
    }
}
