//! Trait definitions for the normalizer module.

use async_trait::async_trait;

use super::error::NormalizeError;

/// Transcodes arbitrary input audio into canonical PCM WAV.
///
/// The output is always single-channel, 16 kHz, signed 16-bit little-endian
/// PCM in a WAV container (`audio/wav`).
#[async_trait]
pub trait AudioNormalizer: Send + Sync {
    async fn normalize(&self, bytes: Vec<u8>) -> Result<Vec<u8>, NormalizeError>;
}

/// Re-encodes arbitrary input images into size-bounded opaque PNG.
///
/// The output is always `image/png`, flattened to RGB, with the larger
/// dimension bounded by the configured maximum. Images already within
/// bounds are never upscaled.
#[async_trait]
pub trait ImageNormalizer: Send + Sync {
    async fn normalize(&self, bytes: Vec<u8>) -> Result<Vec<u8>, NormalizeError>;
}
