//! Configuration for the normalizer module.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for audio and image normalization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizerConfig {
    /// Path to the ffmpeg binary.
    #[serde(default = "default_ffmpeg_path")]
    pub ffmpeg_path: PathBuf,

    /// Target sample rate for normalized audio.
    #[serde(default = "default_sample_rate")]
    pub sample_rate_hz: u32,

    /// Target channel count for normalized audio.
    #[serde(default = "default_channels")]
    pub channels: u8,

    /// Timeout for a single transcode in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Maximum width/height of normalized images.
    #[serde(default = "default_max_dimension")]
    pub max_image_dimension: u32,
}

fn default_ffmpeg_path() -> PathBuf {
    PathBuf::from("ffmpeg")
}

fn default_sample_rate() -> u32 {
    16_000
}

fn default_channels() -> u8 {
    1
}

fn default_timeout() -> u64 {
    120
}

fn default_max_dimension() -> u32 {
    1024
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: default_ffmpeg_path(),
            sample_rate_hz: default_sample_rate(),
            channels: default_channels(),
            timeout_secs: default_timeout(),
            max_image_dimension: default_max_dimension(),
        }
    }
}

impl NormalizerConfig {
    /// Creates a config with a custom ffmpeg path.
    pub fn with_ffmpeg_path(ffmpeg_path: PathBuf) -> Self {
        Self {
            ffmpeg_path,
            ..Default::default()
        }
    }

    /// Sets the transcode timeout in seconds.
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Sets the maximum image dimension.
    pub fn with_max_image_dimension(mut self, max: u32) -> Self {
        self.max_image_dimension = max;
        self
    }
}
