//! Summary generation service.

use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::model::{ModelClient, ModelError};
use crate::pipeline::{assemble, AssembleError, MediaPipeline, ProcessingReport};

use super::prompt::build_prompt;
use super::types::{SummaryRequest, SummaryResult};

/// Errors surfaced to callers of the summary service.
///
/// Per-source media failures are NOT errors at this level; they appear in
/// the processing report of a successful result. Only an empty processed
/// set or a failed model call terminates the request.
#[derive(Debug, thiserror::Error)]
pub enum SummaryError {
    /// Every declared source failed; caller-correctable (bad URLs etc).
    #[error("No files were successfully processed")]
    NoFilesProcessed { report: ProcessingReport },

    /// The downstream model call failed.
    #[error("Failed to generate summary: {source}")]
    Model {
        source: ModelError,
        report: ProcessingReport,
    },
}

/// Generates consultation summaries from declared media sources.
pub struct SummaryService {
    pipeline: MediaPipeline,
    model: Arc<dyn ModelClient>,
}

impl SummaryService {
    pub fn new(pipeline: MediaPipeline, model: Arc<dyn ModelClient>) -> Self {
        Self { pipeline, model }
    }

    /// Model identifier used for results and health reporting.
    pub fn model(&self) -> &str {
        self.model.model()
    }

    /// Runs the full request: fan-out, assembly, model call.
    pub async fn generate(&self, request: SummaryRequest) -> Result<SummaryResult, SummaryError> {
        let request_id = Uuid::new_v4();
        let sources = request.sources();
        info!(
            %request_id,
            audio = 1 + request.additional_audio_urls.len(),
            images = request.image_urls.len(),
            submitted_by = %request.submitted_by,
            "Processing consultation"
        );

        let prompt = build_prompt(&request.template_config, &request.submitted_by);
        let outcomes = self.pipeline.run(sources).await;

        let (contents, report) = assemble(prompt, outcomes).map_err(|e| match e {
            AssembleError::NoFilesProcessed { report } => {
                warn!(errors = report.errors.len(), "No files were successfully processed");
                SummaryError::NoFilesProcessed { report }
            }
        })?;

        if !report.errors.is_empty() {
            warn!(
                failed = report.errors.len(),
                processed = report.total(),
                "Some media files failed to process"
            );
        }

        let summary = self
            .model
            .generate(&contents)
            .await
            .map_err(|source| SummaryError::Model {
                source,
                report: report.clone(),
            })?;

        info!(
            %request_id,
            chars = summary.len(),
            audio = report.audio,
            images = report.images,
            "Summary generated"
        );

        Ok(SummaryResult {
            summary,
            model: self.model.model().to_string(),
            timestamp: Utc::now(),
            files_processed: report,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::ContentElement;
    use crate::summary::types::TemplateConfig;
    use crate::testing::{
        MockAudioNormalizer, MockFetcher, MockImageNormalizer, MockModelClient,
    };

    fn request(
        primary: &str,
        additional: Vec<&str>,
        images: Vec<&str>,
    ) -> SummaryRequest {
        SummaryRequest {
            primary_audio_url: primary.to_string(),
            additional_audio_urls: additional.into_iter().map(String::from).collect(),
            image_urls: images.into_iter().map(String::from).collect(),
            template_config: TemplateConfig::default(),
            submitted_by: "doctor".to_string(),
        }
    }

    fn service_with(fetcher: MockFetcher, model: Arc<MockModelClient>) -> SummaryService {
        let pipeline = MediaPipeline::new(
            Arc::new(fetcher),
            Arc::new(MockAudioNormalizer::new()),
            Arc::new(MockImageNormalizer::new()),
        );
        SummaryService::new(pipeline, model)
    }

    #[tokio::test]
    async fn test_partial_failure_still_succeeds() {
        // Primary mp3 ok, one additional times out, two images ok.
        let fetcher = MockFetcher::new();
        fetcher.with_file("http://x/p.mp3", b"A".to_vec(), Some("audio/mpeg"));
        fetcher.with_timeout("http://x/extra.mp3");
        fetcher.with_file("http://x/1.png", b"I".to_vec(), None);
        fetcher.with_file("http://x/2.png", b"I".to_vec(), None);

        let model = Arc::new(MockModelClient::with_response("Summary text"));
        let service = service_with(fetcher, Arc::clone(&model));

        let result = service
            .generate(request(
                "http://x/p.mp3",
                vec!["http://x/extra.mp3"],
                vec!["http://x/1.png", "http://x/2.png"],
            ))
            .await
            .unwrap();

        assert_eq!(result.summary, "Summary text");
        assert_eq!(result.files_processed.audio, 1);
        assert_eq!(result.files_processed.images, 2);
        assert_eq!(result.files_processed.errors.len(), 1);
        assert!(result.files_processed.errors[0].contains("additional audio 1"));

        // Prompt + 3 media parts reached the model.
        let calls = model.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].len(), 4);
        assert!(matches!(calls[0][0], ContentElement::Text(_)));
    }

    #[tokio::test]
    async fn test_all_failed_never_calls_model() {
        let fetcher = MockFetcher::new();
        fetcher.with_http_error("http://x/p.mp3", 404);
        fetcher.with_http_error("http://x/i.png", 500);

        let model = Arc::new(MockModelClient::with_response("unused"));
        let service = service_with(fetcher, Arc::clone(&model));

        let result = service
            .generate(request("http://x/p.mp3", vec![], vec!["http://x/i.png"]))
            .await;

        match result {
            Err(SummaryError::NoFilesProcessed { report }) => {
                assert_eq!(report.errors.len(), 2);
            }
            _ => panic!("expected NoFilesProcessed"),
        }
        assert!(model.calls().is_empty());
    }

    #[tokio::test]
    async fn test_failed_primary_with_surviving_images_succeeds() {
        let fetcher = MockFetcher::new();
        fetcher.with_transport_error("http://x/p.mp3", "connection refused");
        fetcher.with_file("http://x/i.png", b"I".to_vec(), None);

        let model = Arc::new(MockModelClient::with_response("Images only"));
        let service = service_with(fetcher, model);

        let result = service
            .generate(request("http://x/p.mp3", vec![], vec!["http://x/i.png"]))
            .await
            .unwrap();

        assert_eq!(result.files_processed.audio, 0);
        assert_eq!(result.files_processed.images, 1);
        assert_eq!(result.files_processed.errors.len(), 1);
    }

    #[tokio::test]
    async fn test_model_failure_surfaces_with_report() {
        let fetcher = MockFetcher::new();
        fetcher.with_file("http://x/p.mp3", b"A".to_vec(), None);

        let model = Arc::new(MockModelClient::failing(ModelError::Api {
            status: 503,
            message: "overloaded".to_string(),
        }));
        let service = service_with(fetcher, model);

        let result = service
            .generate(request("http://x/p.mp3", vec![], vec![]))
            .await;

        match result {
            Err(SummaryError::Model { source, report }) => {
                assert!(matches!(source, ModelError::Api { status: 503, .. }));
                assert_eq!(report.audio, 1);
            }
            _ => panic!("expected Model error"),
        }
    }

    #[tokio::test]
    async fn test_result_metadata() {
        let fetcher = MockFetcher::new();
        fetcher.with_file("http://x/p.mp3", b"A".to_vec(), None);

        let model = Arc::new(MockModelClient::with_response("ok"));
        let service = service_with(fetcher, model);

        let result = service
            .generate(request("http://x/p.mp3", vec![], vec![]))
            .await
            .unwrap();
        assert_eq!(result.model, "mock-model");
    }
}
