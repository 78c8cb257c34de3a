pub mod config;
pub mod fetcher;
pub mod metrics;
pub mod mime;
pub mod model;
pub mod normalizer;
pub mod pipeline;
pub mod summary;
pub mod testing;

pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, GeminiConfig,
    PipelineConfig, SanitizedConfig, ServerConfig,
};
pub use fetcher::{FetchError, FetchedFile, Fetcher, FetcherConfig, HttpFetcher};
pub use mime::detect_mime_type;
pub use model::{GeminiClient, ModelClient, ModelError};
pub use normalizer::{
    AudioNormalizer, FfmpegAudioNormalizer, ImageNormalizer, NormalizeError, NormalizerConfig,
    RasterImageNormalizer,
};
pub use pipeline::{
    ContentElement, MediaKind, MediaPart, MediaPipeline, MediaSource, Outcome, ProcessingReport,
};
pub use summary::{
    build_prompt, SummaryError, SummaryRequest, SummaryResult, SummaryService, TemplateConfig,
};
