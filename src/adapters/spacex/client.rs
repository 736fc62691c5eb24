//! SpaceX Client - Implementation of LaunchFeed for the public SpaceX API.
//!
//! # Configuration
//!
//! ```ignore
//! let config = SpaceXConfig::new()
//!     .with_base_url("https://api.spacexdata.com/v4")
//!     .with_timeout(Duration::from_secs(10));
//!
//! let client = SpaceXClient::new(config)?;
//! ```
//!
//! Only `/launchpads` and `/launches/upcoming` are used. Unknown fields in
//! the payloads are ignored.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use crate::ports::{FeedLaunch, FeedLaunchpad, LaunchFeed, LaunchFeedError};

/// Configuration for the SpaceX feed client.
#[derive(Debug, Clone)]
pub struct SpaceXConfig {
    /// Base URL for the API (default: https://api.spacexdata.com/v4).
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl SpaceXConfig {
    pub fn new() -> Self {
        Self {
            base_url: "https://api.spacexdata.com/v4".to_string(),
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for SpaceXConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// HTTP client for the SpaceX launch feed.
pub struct SpaceXClient {
    config: SpaceXConfig,
    client: Client,
}

impl SpaceXClient {
    /// # Errors
    ///
    /// `LaunchFeedError::Transport` if the HTTP client cannot be built.
    pub fn new(config: SpaceXConfig) -> Result<Self, LaunchFeedError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| LaunchFeedError::Transport(e.to_string()))?;
        Ok(Self { config, client })
    }

    fn url(&self, resource: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), resource)
    }

    async fn get_json<T: DeserializeOwned>(&self, resource: &str) -> Result<T, LaunchFeedError> {
        let url = self.url(resource);
        debug!(%url, "Fetching launch feed resource");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| LaunchFeedError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LaunchFeedError::UnexpectedStatus {
                resource: resource.to_string(),
                status: status.as_u16(),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| LaunchFeedError::Decode(e.to_string()))
    }
}

#[async_trait]
impl LaunchFeed for SpaceXClient {
    async fn fetch_launchpads(&self) -> Result<Vec<FeedLaunchpad>, LaunchFeedError> {
        self.get_json("/launchpads").await
    }

    async fn fetch_upcoming_launches(&self) -> Result<Vec<FeedLaunch>, LaunchFeedError> {
        self.get_json("/launches/upcoming").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;

    /// Serves `router` on an ephemeral port and returns its base URL.
    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/v4", addr)
    }

    fn client(base_url: String) -> SpaceXClient {
        SpaceXClient::new(
            SpaceXConfig::new()
                .with_base_url(base_url)
                .with_timeout(Duration::from_secs(5)),
        )
        .unwrap()
    }

    #[test]
    fn url_joins_without_double_slash() {
        let client = client("https://api.spacexdata.com/v4/".to_string());
        assert_eq!(
            client.url("/launchpads"),
            "https://api.spacexdata.com/v4/launchpads"
        );
    }

    #[tokio::test]
    async fn fetches_launchpads_ignoring_extra_fields() {
        let router = Router::new().route(
            "/v4/launchpads",
            get(|| async {
                Json(json!([{
                    "id": "5e9e4502f509094188566f88",
                    "name": "KSC LC 39A",
                    "full_name": "Kennedy Space Center Historic Launch Complex 39A",
                    "status": "active",
                    "launch_attempts": 55
                }]))
            }),
        );
        let base_url = serve(router).await;

        let launchpads = client(base_url).fetch_launchpads().await.unwrap();

        assert_eq!(launchpads.len(), 1);
        assert_eq!(launchpads[0].name, "KSC LC 39A");
        assert_eq!(launchpads[0].status, "active");
    }

    #[tokio::test]
    async fn fetches_upcoming_launches() {
        let router = Router::new().route(
            "/v4/launches/upcoming",
            get(|| async {
                Json(json!([
                    {"id": "a", "launchpad": "5e9e4502f509094188566f88", "date_unix": 1893456000},
                    {"id": "b", "launchpad": null, "date_unix": 1893542400}
                ]))
            }),
        );
        let base_url = serve(router).await;

        let launches = client(base_url).fetch_upcoming_launches().await.unwrap();

        assert_eq!(launches.len(), 2);
        assert_eq!(launches[1].launchpad, None);
    }

    #[tokio::test]
    async fn non_success_status_is_reported() {
        let router = Router::new().route(
            "/v4/launchpads",
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "maintenance") }),
        );
        let base_url = serve(router).await;

        let err = client(base_url).fetch_launchpads().await.unwrap_err();

        assert!(matches!(
            err,
            LaunchFeedError::UnexpectedStatus { status: 503, .. }
        ));
    }

    #[tokio::test]
    async fn malformed_payload_is_a_decode_error() {
        let router = Router::new().route(
            "/v4/launchpads",
            get(|| async { Json(json!({"unexpected": "object"})) }),
        );
        let base_url = serve(router).await;

        let err = client(base_url).fetch_launchpads().await.unwrap_err();

        assert!(matches!(err, LaunchFeedError::Decode(_)));
    }

    #[tokio::test]
    async fn unreachable_feed_is_a_transport_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client(format!("http://{}", addr))
            .fetch_launchpads()
            .await
            .unwrap_err();

        assert!(matches!(err, LaunchFeedError::Transport(_)));
    }
}
