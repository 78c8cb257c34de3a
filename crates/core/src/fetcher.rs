//! Remote file fetching over HTTP.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::metrics;

/// Errors that can occur while fetching a remote file.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The request exceeded the configured timeout.
    #[error("Download timed out after {timeout_secs}s: {url}")]
    Timeout { url: String, timeout_secs: u64 },

    /// The server answered with a non-2xx status.
    #[error("Download failed with HTTP {status}: {url}")]
    Http { status: u16, url: String },

    /// Network-level fault (DNS, connection refused, TLS, truncated body).
    #[error("Download failed for {url}: {reason}")]
    Transport { url: String, reason: String },
}

/// A raw file as fetched from a remote URL.
///
/// Owned by the fetch step that produced it; consumed by normalization.
#[derive(Debug, Clone)]
pub struct FetchedFile {
    pub bytes: Vec<u8>,
    /// Raw content-type header, if the server sent one.
    pub content_type: Option<String>,
    pub url: String,
}

/// Configuration for the HTTP fetcher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetcherConfig {
    /// Connection and response timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_timeout() -> u64 {
    30
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
        }
    }
}

/// A fetcher that retrieves raw bytes from a remote URL.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetches the file at `url`.
    ///
    /// No retries are performed; a failure is terminal for this call.
    async fn fetch(&self, url: &str) -> Result<FetchedFile, FetchError>;
}

/// HTTP fetcher backed by a shared reqwest client.
pub struct HttpFetcher {
    client: reqwest::Client,
    timeout_secs: u64,
}

impl HttpFetcher {
    pub fn new(config: FetcherConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_default();
        Self {
            client,
            timeout_secs: config.timeout_secs,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(FetcherConfig::default())
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedFile, FetchError> {
        let response = self.client.get(url).send().await.map_err(|e| {
            metrics::FETCHES_TOTAL.with_label_values(&["transport_error"]).inc();
            if e.is_timeout() {
                FetchError::Timeout {
                    url: url.to_string(),
                    timeout_secs: self.timeout_secs,
                }
            } else {
                FetchError::Transport {
                    url: url.to_string(),
                    reason: e.to_string(),
                }
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            metrics::FETCHES_TOTAL.with_label_values(&["http_error"]).inc();
            return Err(FetchError::Http {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string());

        let bytes = response.bytes().await.map_err(|e| {
            metrics::FETCHES_TOTAL.with_label_values(&["transport_error"]).inc();
            if e.is_timeout() {
                FetchError::Timeout {
                    url: url.to_string(),
                    timeout_secs: self.timeout_secs,
                }
            } else {
                FetchError::Transport {
                    url: url.to_string(),
                    reason: e.to_string(),
                }
            }
        })?;

        debug!(
            url = url,
            size = bytes.len(),
            content_type = ?content_type,
            "Downloaded file"
        );
        metrics::FETCHES_TOTAL.with_label_values(&["ok"]).inc();
        metrics::FETCHED_BYTES.inc_by(bytes.len() as u64);

        Ok(FetchedFile {
            bytes: bytes.to_vec(),
            content_type,
            url: url.to_string(),
        })
    }
}
