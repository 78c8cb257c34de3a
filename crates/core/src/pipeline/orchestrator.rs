//! Concurrent fetch+normalize orchestration.

use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{debug, warn};

use crate::fetcher::Fetcher;
use crate::metrics;
use crate::mime::detect_mime_type;
use crate::normalizer::{AudioNormalizer, ImageNormalizer, PNG_MIME, WAV_MIME};

use super::types::{MediaPart, MediaSource, Outcome};

/// Default upper bound on concurrent fetch+normalize tasks per pipeline.
const DEFAULT_MAX_PARALLEL: usize = 8;

/// Runs the fetch+normalize fan-out for a set of declared media sources.
///
/// Each source yields exactly one [`Outcome`]; no source is processed twice
/// or silently dropped. One task's failure never cancels the others.
pub struct MediaPipeline {
    fetcher: Arc<dyn Fetcher>,
    audio: Arc<dyn AudioNormalizer>,
    image: Arc<dyn ImageNormalizer>,
    semaphore: Arc<Semaphore>,
}

impl MediaPipeline {
    pub fn new(
        fetcher: Arc<dyn Fetcher>,
        audio: Arc<dyn AudioNormalizer>,
        image: Arc<dyn ImageNormalizer>,
    ) -> Self {
        Self {
            fetcher,
            audio,
            image,
            semaphore: Arc::new(Semaphore::new(DEFAULT_MAX_PARALLEL)),
        }
    }

    /// Bounds the number of concurrently running tasks.
    pub fn with_max_parallel(mut self, max: usize) -> Self {
        self.semaphore = Arc::new(Semaphore::new(max.max(1)));
        self
    }

    /// Processes all sources concurrently and waits for every task.
    ///
    /// Outcomes are returned in the order the sources were declared. An
    /// empty source set returns an empty vec immediately.
    pub async fn run(&self, sources: Vec<MediaSource>) -> Vec<Outcome> {
        if sources.is_empty() {
            return Vec::new();
        }

        debug!(sources = sources.len(), "Dispatching media tasks");

        let tasks = sources.into_iter().map(|source| {
            let fetcher = Arc::clone(&self.fetcher);
            let audio = Arc::clone(&self.audio);
            let image = Arc::clone(&self.image);
            let semaphore = Arc::clone(&self.semaphore);

            async move {
                let _permit = match semaphore.acquire().await {
                    Ok(permit) => permit,
                    Err(_) => {
                        // Semaphore closed only if the pipeline is torn down
                        // mid-request; surface as a per-source failure.
                        return Outcome {
                            result: Err(format!(
                                "Failed to process {} {}: pipeline unavailable",
                                source.identifier(),
                                source.url
                            )),
                            source,
                        };
                    }
                };
                Self::process_source(fetcher, audio, image, source).await
            }
        });

        futures::future::join_all(tasks).await
    }

    /// Runs one source to a terminal outcome, capturing every fault.
    async fn process_source(
        fetcher: Arc<dyn Fetcher>,
        audio: Arc<dyn AudioNormalizer>,
        image: Arc<dyn ImageNormalizer>,
        source: MediaSource,
    ) -> Outcome {
        let result = Self::fetch_and_normalize(fetcher, audio, image, &source).await;

        let label = if result.is_ok() { "ok" } else { "error" };
        metrics::SOURCE_OUTCOMES
            .with_label_values(&[source.kind.metric_label(), label])
            .inc();

        if let Err(ref message) = result {
            warn!(identifier = %source.identifier(), error = %message, "Media task failed");
        }

        Outcome { source, result }
    }

    async fn fetch_and_normalize(
        fetcher: Arc<dyn Fetcher>,
        audio: Arc<dyn AudioNormalizer>,
        image: Arc<dyn ImageNormalizer>,
        source: &MediaSource,
    ) -> Result<MediaPart, String> {
        let fetched = fetcher
            .fetch(&source.url)
            .await
            .map_err(|e| failure_message(source, &e))?;

        // Declared type is diagnostic only; normalization decides by kind.
        let declared_mime = detect_mime_type(&source.url, fetched.content_type.as_deref());
        debug!(
            identifier = %source.identifier(),
            url = %source.url,
            mime = %declared_mime,
            size = fetched.bytes.len(),
            "Fetched media file"
        );

        let (bytes, mime_type) = if source.kind.is_audio() {
            let wav = audio
                .normalize(fetched.bytes)
                .await
                .map_err(|e| failure_message(source, &e))?;
            (wav, WAV_MIME.to_string())
        } else {
            let png = image
                .normalize(fetched.bytes)
                .await
                .map_err(|e| failure_message(source, &e))?;
            (png, PNG_MIME.to_string())
        };

        Ok(MediaPart {
            bytes,
            mime_type,
            source: source.clone(),
        })
    }
}

fn failure_message(source: &MediaSource, error: &dyn std::fmt::Display) -> String {
    format!(
        "Failed to process {} {}: {}",
        source.identifier(),
        source.url,
        error
    )
}
