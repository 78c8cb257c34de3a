use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Gemini section exists (enforced by serde)
/// - Gemini API key is non-empty
/// - Server port is not 0
/// - Normalizer targets are sane
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    // Server validation
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    // Gemini validation
    if config.gemini.api_key.is_empty() {
        return Err(ConfigError::ValidationError(
            "gemini.api_key cannot be empty".to_string(),
        ));
    }

    // Normalizer validation
    if config.normalizer.sample_rate_hz == 0 {
        return Err(ConfigError::ValidationError(
            "normalizer.sample_rate_hz cannot be 0".to_string(),
        ));
    }
    if config.normalizer.channels == 0 {
        return Err(ConfigError::ValidationError(
            "normalizer.channels cannot be 0".to_string(),
        ));
    }
    if config.normalizer.max_image_dimension == 0 {
        return Err(ConfigError::ValidationError(
            "normalizer.max_image_dimension cannot be 0".to_string(),
        ));
    }

    if config.pipeline.max_parallel_tasks == 0 {
        return Err(ConfigError::ValidationError(
            "pipeline.max_parallel_tasks cannot be 0".to_string(),
        ));
    }

    Ok(())
}
