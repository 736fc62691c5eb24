//! Launch feed ports - the external catalog source and its slot sink.
//!
//! [`LaunchFeed`] fetches launchpads and upcoming launches from the outside
//! world (the SpaceX public API in production). [`FeedSlotWriter`] records
//! those launches as occupied slots so admission sees them as busy days.

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::booking::ScheduledSlot;
use crate::domain::foundation::{DomainError, ErrorCode};

/// Launchpad as described by the feed. Only the fields we use are kept.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FeedLaunchpad {
    pub id: String,
    pub name: String,
    pub status: String,
}

/// Upcoming launch as described by the feed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FeedLaunch {
    pub id: String,
    /// Launchpad id; missing for launches whose pad is not assigned yet.
    pub launchpad: Option<String>,
    pub date_unix: i64,
}

/// Errors from the external feed.
#[derive(Debug, Clone, Error)]
pub enum LaunchFeedError {
    #[error("Feed request failed: {0}")]
    Transport(String),

    #[error("Feed returned status {status} for {resource}")]
    UnexpectedStatus { resource: String, status: u16 },

    #[error("Feed payload could not be decoded: {0}")]
    Decode(String),
}

impl From<LaunchFeedError> for DomainError {
    fn from(err: LaunchFeedError) -> Self {
        DomainError::new(ErrorCode::ExternalServiceError, err.to_string())
    }
}

#[async_trait]
pub trait LaunchFeed: Send + Sync {
    async fn fetch_launchpads(&self) -> Result<Vec<FeedLaunchpad>, LaunchFeedError>;

    async fn fetch_upcoming_launches(&self) -> Result<Vec<FeedLaunch>, LaunchFeedError>;
}

/// Store-side sink for feed launches.
#[async_trait]
pub trait FeedSlotWriter: Send + Sync {
    /// Insert the slot unless one already exists with the same external id
    /// or the same (launchpad, date). Returns `true` when inserted.
    async fn insert_feed_slot(&self, slot: &ScheduledSlot) -> Result<bool, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn launch_feed_is_object_safe() {
        fn _accepts_dyn(_feed: &dyn LaunchFeed) {}
        fn _accepts_dyn_writer(_writer: &dyn FeedSlotWriter) {}
    }

    #[test]
    fn feed_launch_tolerates_missing_launchpad() {
        let json = r#"{"id": "633f72000531f07b4fdf59c3", "launchpad": null, "date_unix": 1893456000, "name": "ignored"}"#;
        let launch: FeedLaunch = serde_json::from_str(json).unwrap();
        assert_eq!(launch.launchpad, None);
        assert_eq!(launch.date_unix, 1893456000);
    }

    #[test]
    fn feed_error_maps_to_external_service_error() {
        let err: DomainError = LaunchFeedError::UnexpectedStatus {
            resource: "/launchpads".to_string(),
            status: 503,
        }
        .into();
        assert_eq!(err.code, ErrorCode::ExternalServiceError);
        assert!(err.message.contains("503"));
    }
}
