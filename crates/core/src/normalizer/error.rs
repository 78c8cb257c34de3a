//! Error types for the normalizer module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during media normalization.
#[derive(Debug, Error)]
pub enum NormalizeError {
    /// FFmpeg binary not found.
    #[error("FFmpeg not found at path: {}", path.display())]
    FfmpegNotFound { path: PathBuf },

    /// Transcoder exited with a non-zero status.
    #[error("Audio transcode failed: {stderr}")]
    AudioTranscode { stderr: String },

    /// Transcode timed out.
    #[error("Transcode timed out after {timeout_secs} seconds")]
    Timeout { timeout_secs: u64 },

    /// Input bytes could not be decoded as an image.
    #[error("Image decode failed: {reason}")]
    ImageDecode { reason: String },

    /// Normalized image could not be encoded as PNG.
    #[error("Image encode failed: {reason}")]
    ImageEncode { reason: String },

    /// I/O error during normalization.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Background normalization task failed.
    #[error("Normalization task failed: {0}")]
    Task(String),
}

impl NormalizeError {
    /// Creates an audio transcode error, trimming trailing whitespace from
    /// the captured stderr.
    pub fn audio_transcode(stderr: impl Into<String>) -> Self {
        Self::AudioTranscode {
            stderr: stderr.into().trim_end().to_string(),
        }
    }

    /// Creates an image decode error.
    pub fn image_decode(reason: impl Into<String>) -> Self {
        Self::ImageDecode {
            reason: reason.into(),
        }
    }
}
