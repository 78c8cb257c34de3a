use mediscribe_core::{Config, SanitizedConfig, SummaryService};

/// Shared application state
pub struct AppState {
    config: Config,
    service: SummaryService,
    ffmpeg_available: bool,
}

impl AppState {
    pub fn new(config: Config, service: SummaryService, ffmpeg_available: bool) -> Self {
        Self {
            config,
            service,
            ffmpeg_available,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn service(&self) -> &SummaryService {
        &self.service
    }

    /// Model identifier reported by /health and summary responses.
    pub fn model(&self) -> &str {
        self.service.model()
    }

    /// Whether the transcoder probe succeeded at startup. Audio sources
    /// fail per-request while this is false; images still work.
    pub fn ffmpeg_available(&self) -> bool {
        self.ffmpeg_available
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }
}
