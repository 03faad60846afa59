//! NASA NeoWs feed client
//!
//! Fetches the raw near-Earth object feed for the current day. Decoding is
//! left to the caller so the untouched response bytes can be cached.

use std::future::Future;
use std::time::Duration;

use chrono::Local;
use reqwest::{Client, StatusCode};

use super::AsteroidsError;

/// Base URL for the NeoWs feed endpoint
pub const NEOWS_FEED_URL: &str = "https://api.nasa.gov/neo/rest/v1/feed";

/// Total request timeout (connect + read)
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Date format expected by the `start_date` query parameter
const START_DATE_FORMAT: &str = "%Y-%m-%d";

/// Source of raw feed response bytes
pub trait Feed {
    /// Fetches today's feed and returns the response body
    fn fetch(&self) -> impl Future<Output = Result<Vec<u8>, AsteroidsError>> + Send;
}

/// Client for the NeoWs `feed` endpoint
#[derive(Debug, Clone)]
pub struct NeoWsFeed {
    /// HTTP client for making requests
    client: Client,
    /// API key sent as a query parameter
    api_key: String,
    /// Feed endpoint (allows override for testing)
    base_url: String,
    /// Total time allowed per request
    timeout: Duration,
}

impl NeoWsFeed {
    /// Creates a feed client for the public NeoWs endpoint
    ///
    /// Certificate verification stays disabled unless `verify_tls` is set,
    /// matching the behavior the service has always shipped with.
    ///
    /// # Returns
    /// * `Ok(NeoWsFeed)` - Ready to fetch
    /// * `Err(AsteroidsError::Request)` - If the HTTP client cannot be built
    pub fn new(api_key: impl Into<String>, verify_tls: bool) -> Result<Self, AsteroidsError> {
        let client = Client::builder()
            .danger_accept_invalid_certs(!verify_tls)
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: NEOWS_FEED_URL.to_string(),
            timeout: REQUEST_TIMEOUT,
        })
    }

    /// Points the client at a different feed endpoint
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Overrides the total request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Feed for NeoWsFeed {
    /// Fetches the feed starting at today's local date
    ///
    /// # Returns
    /// * `Ok(Vec<u8>)` - The full response body
    /// * `Err(AsteroidsError::Request)` - If sending or reading the body fails
    /// * `Err(AsteroidsError::UpstreamStatus)` - If the status is not 200
    async fn fetch(&self) -> Result<Vec<u8>, AsteroidsError> {
        let start_date = Local::now().format(START_DATE_FORMAT).to_string();

        let response = self
            .client
            .get(&self.base_url)
            .timeout(self.timeout)
            .query(&[
                ("start_date", start_date.as_str()),
                ("api_key", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(AsteroidsError::UpstreamStatus(status.as_u16()));
        }

        let body = response.bytes().await?;
        Ok(body.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::Query, http::StatusCode as AxumStatus, routing::get, Json, Router};
    use std::collections::HashMap;

    /// Serves `router` on an ephemeral local port and returns the feed URL
    async fn spawn_feed(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Listener has no address");
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Test feed server failed");
        });
        format!("http://{}/neo/rest/v1/feed", addr)
    }

    #[tokio::test]
    async fn test_fetch_sends_start_date_and_api_key() {
        let router = Router::new().route(
            "/neo/rest/v1/feed",
            get(|Query(params): Query<HashMap<String, String>>| async move { Json(params) }),
        );
        let url = spawn_feed(router).await;
        let feed = NeoWsFeed::new("DEMO_KEY", false).unwrap().with_base_url(url);

        let body = feed.fetch().await.expect("Fetch should succeed");
        let params: HashMap<String, String> = serde_json::from_slice(&body).unwrap();

        assert_eq!(params.get("api_key").map(String::as_str), Some("DEMO_KEY"));
        let today = Local::now().format("%Y-%m-%d").to_string();
        assert_eq!(params.get("start_date"), Some(&today));
    }

    #[tokio::test]
    async fn test_fetch_returns_raw_body() {
        let router = Router::new().route("/neo/rest/v1/feed", get(|| async { "raw feed bytes" }));
        let url = spawn_feed(router).await;
        let feed = NeoWsFeed::new("key", false).unwrap().with_base_url(url);

        let body = feed.fetch().await.expect("Fetch should succeed");

        assert_eq!(body, b"raw feed bytes".to_vec());
    }

    #[tokio::test]
    async fn test_fetch_non_ok_status_is_upstream_error() {
        let router = Router::new().route(
            "/neo/rest/v1/feed",
            get(|| async { (AxumStatus::SERVICE_UNAVAILABLE, "try later") }),
        );
        let url = spawn_feed(router).await;
        let feed = NeoWsFeed::new("key", false).unwrap().with_base_url(url);

        let err = feed.fetch().await.unwrap_err();

        assert!(matches!(err, AsteroidsError::UpstreamStatus(503)), "got {:?}", err);
    }

    #[tokio::test]
    async fn test_fetch_invalid_url_is_request_error() {
        let feed = NeoWsFeed::new("key", true).unwrap().with_base_url("not a url");

        let err = feed.fetch().await.unwrap_err();

        assert!(matches!(err, AsteroidsError::Request(_)), "got {:?}", err);
    }

    #[tokio::test]
    async fn test_fetch_unreachable_host_is_request_error() {
        // Bind then drop to get a port nothing listens on
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let feed = NeoWsFeed::new("key", false)
            .unwrap()
            .with_base_url(format!("http://{}/feed", addr));

        let err = feed.fetch().await.unwrap_err();

        assert!(matches!(err, AsteroidsError::Request(_)), "got {:?}", err);
    }

    #[tokio::test]
    async fn test_fetch_slow_feed_times_out() {
        let router = Router::new().route(
            "/neo/rest/v1/feed",
            get(|| async {
                tokio::time::sleep(Duration::from_millis(500)).await;
                "too late"
            }),
        );
        let url = spawn_feed(router).await;
        let feed = NeoWsFeed::new("key", false)
            .unwrap()
            .with_base_url(url)
            .with_timeout(Duration::from_millis(50));

        let err = feed.fetch().await.unwrap_err();

        match err {
            AsteroidsError::Request(e) => assert!(e.is_timeout(), "Expected timeout, got {:?}", e),
            other => panic!("Expected Request error, got {:?}", other),
        }
    }

    #[test]
    fn test_new_uses_defaults() {
        let feed = NeoWsFeed::new("key", false).unwrap();
        assert_eq!(feed.base_url, NEOWS_FEED_URL);
        assert_eq!(feed.timeout, REQUEST_TIMEOUT);
        assert_eq!(REQUEST_TIMEOUT, Duration::from_secs(10));
    }
}
