use serde::{Deserialize, Serialize};
use std::net::IpAddr;

use crate::fetcher::FetcherConfig;
use crate::normalizer::NormalizerConfig;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub gemini: GeminiConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub fetcher: FetcherConfig,
    #[serde(default)]
    pub normalizer: NormalizerConfig,
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Origin allowed to call the API. Permissive when unset.
    #[serde(default)]
    pub allowed_origin: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            allowed_origin: None,
        }
    }
}

fn default_host() -> IpAddr {
    "0.0.0.0".parse().unwrap()
}

fn default_port() -> u16 {
    8080
}

/// Gemini API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeminiConfig {
    /// API key for the Gemini service
    pub api_key: String,
    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,
    /// API base URL
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Request timeout in seconds
    #[serde(default = "default_model_timeout")]
    pub timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_model(),
            api_base: default_api_base(),
            timeout_secs: default_model_timeout(),
        }
    }
}

fn default_model() -> String {
    "gemini-2.5-flash-preview-05-20".to_string()
}

fn default_api_base() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_model_timeout() -> u64 {
    120
}

/// Fan-out pipeline configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PipelineConfig {
    /// Upper bound on concurrent fetch+normalize tasks per request.
    #[serde(default = "default_max_parallel")]
    pub max_parallel_tasks: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_parallel_tasks: default_max_parallel(),
        }
    }
}

fn default_max_parallel() -> usize {
    8
}

/// Sanitized config for API responses (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub server: ServerConfig,
    pub gemini: SanitizedGeminiConfig,
    pub fetcher: FetcherConfig,
    pub normalizer: NormalizerConfig,
    pub pipeline: PipelineConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct SanitizedGeminiConfig {
    pub api_key: String,
    pub model: String,
    pub api_base: String,
    pub timeout_secs: u64,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            server: config.server.clone(),
            gemini: SanitizedGeminiConfig {
                api_key: "***".to_string(),
                model: config.gemini.model.clone(),
                api_base: config.gemini.api_base.clone(),
                timeout_secs: config.gemini.timeout_secs,
            },
            fetcher: config.fetcher.clone(),
            normalizer: config.normalizer.clone(),
            pipeline: config.pipeline.clone(),
        }
    }
}
