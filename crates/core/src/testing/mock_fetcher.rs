//! Mock fetcher for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::fetcher::{FetchError, FetchedFile, Fetcher};

/// Configured behavior for one URL.
#[derive(Debug, Clone)]
enum MockResponse {
    File {
        bytes: Vec<u8>,
        content_type: Option<String>,
    },
    HttpError(u16),
    Timeout,
    Transport(String),
}

/// Mock implementation of the [`Fetcher`] trait.
///
/// URLs must be configured up front; fetching an unconfigured URL is a
/// transport error. All fetched URLs are recorded for assertions.
#[derive(Default)]
pub struct MockFetcher {
    responses: Mutex<HashMap<String, MockResponse>>,
    fetched: Mutex<Vec<String>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures a successful download.
    pub fn with_file(&self, url: &str, bytes: Vec<u8>, content_type: Option<&str>) {
        self.responses.lock().unwrap().insert(
            url.to_string(),
            MockResponse::File {
                bytes,
                content_type: content_type.map(String::from),
            },
        );
    }

    /// Configures a non-2xx HTTP response.
    pub fn with_http_error(&self, url: &str, status: u16) {
        self.responses
            .lock()
            .unwrap()
            .insert(url.to_string(), MockResponse::HttpError(status));
    }

    /// Configures a timeout.
    pub fn with_timeout(&self, url: &str) {
        self.responses
            .lock()
            .unwrap()
            .insert(url.to_string(), MockResponse::Timeout);
    }

    /// Configures a network-level failure.
    pub fn with_transport_error(&self, url: &str, reason: &str) {
        self.responses
            .lock()
            .unwrap()
            .insert(url.to_string(), MockResponse::Transport(reason.to_string()));
    }

    /// URLs fetched so far, in call order.
    pub fn fetched_urls(&self) -> Vec<String> {
        self.fetched.lock().unwrap().clone()
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedFile, FetchError> {
        self.fetched.lock().unwrap().push(url.to_string());

        let response = self.responses.lock().unwrap().get(url).cloned();
        match response {
            Some(MockResponse::File {
                bytes,
                content_type,
            }) => Ok(FetchedFile {
                bytes,
                content_type,
                url: url.to_string(),
            }),
            Some(MockResponse::HttpError(status)) => Err(FetchError::Http {
                status,
                url: url.to_string(),
            }),
            Some(MockResponse::Timeout) => Err(FetchError::Timeout {
                url: url.to_string(),
                timeout_secs: 30,
            }),
            Some(MockResponse::Transport(reason)) => Err(FetchError::Transport {
                url: url.to_string(),
                reason,
            }),
            None => Err(FetchError::Transport {
                url: url.to_string(),
                reason: "no mock response configured".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_configured_file() {
        let fetcher = MockFetcher::new();
        fetcher.with_file("http://x/a", b"abc".to_vec(), Some("audio/mpeg"));

        let file = fetcher.fetch("http://x/a").await.unwrap();
        assert_eq!(file.bytes, b"abc");
        assert_eq!(file.content_type.as_deref(), Some("audio/mpeg"));
        assert_eq!(fetcher.fetched_urls(), vec!["http://x/a".to_string()]);
    }

    #[tokio::test]
    async fn test_unconfigured_url_is_transport_error() {
        let fetcher = MockFetcher::new();
        let result = fetcher.fetch("http://x/unknown").await;
        assert!(matches!(result, Err(FetchError::Transport { .. })));
    }
}
