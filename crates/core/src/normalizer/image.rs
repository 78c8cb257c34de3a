//! Raster image normalization using the image crate.

use async_trait::async_trait;
use image::codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder};
use image::imageops::FilterType;
use image::DynamicImage;
use std::io::Cursor;
use std::time::Instant;
use tracing::debug;

use crate::metrics;

use super::config::NormalizerConfig;
use super::error::NormalizeError;
use super::traits::ImageNormalizer;

/// Image normalizer that decodes with the image crate and re-encodes as PNG.
///
/// Decode, resize and encode are CPU-bound, so the work runs on the
/// blocking thread pool rather than the async executor.
pub struct RasterImageNormalizer {
    max_dimension: u32,
}

impl RasterImageNormalizer {
    /// Creates a new image normalizer bounded by the configured dimension.
    pub fn new(config: &NormalizerConfig) -> Self {
        Self {
            max_dimension: config.max_image_dimension,
        }
    }

    /// Creates a normalizer with the default 1024 px bound.
    pub fn with_defaults() -> Self {
        Self::new(&NormalizerConfig::default())
    }
}

#[async_trait]
impl ImageNormalizer for RasterImageNormalizer {
    async fn normalize(&self, bytes: Vec<u8>) -> Result<Vec<u8>, NormalizeError> {
        let start = Instant::now();
        let max_dimension = self.max_dimension;

        let result = tokio::task::spawn_blocking(move || normalize_sync(&bytes, max_dimension))
            .await
            .map_err(|e| NormalizeError::Task(e.to_string()))?;

        let label = if result.is_ok() { "ok" } else { "error" };
        metrics::NORMALIZATIONS_TOTAL
            .with_label_values(&["image", label])
            .inc();
        if result.is_ok() {
            metrics::NORMALIZATION_DURATION
                .with_label_values(&["image"])
                .observe(start.elapsed().as_secs_f64());
        }
        result
    }
}

/// Decodes, flattens, bounds and re-encodes an image as PNG.
fn normalize_sync(bytes: &[u8], max_dimension: u32) -> Result<Vec<u8>, NormalizeError> {
    let decoded = image::load_from_memory(bytes)
        .map_err(|e| NormalizeError::image_decode(e.to_string()))?;

    // Flatten alpha/palette modes to opaque RGB.
    let rgb = decoded.to_rgb8();
    let (width, height) = rgb.dimensions();

    let image = if width > max_dimension || height > max_dimension {
        let (new_width, new_height) = bounded_dimensions(width, height, max_dimension);
        debug!(
            from = format!("{}x{}", width, height),
            to = format!("{}x{}", new_width, new_height),
            "Downscaling image"
        );
        image::imageops::resize(&rgb, new_width, new_height, FilterType::Lanczos3)
    } else {
        rgb
    };

    let mut out = Vec::new();
    let encoder = PngEncoder::new_with_quality(
        Cursor::new(&mut out),
        CompressionType::Best,
        PngFilterType::Adaptive,
    );
    DynamicImage::ImageRgb8(image)
        .write_with_encoder(encoder)
        .map_err(|e| NormalizeError::ImageEncode {
            reason: e.to_string(),
        })?;

    Ok(out)
}

/// Scales (width, height) down so the larger dimension equals `max`,
/// preserving aspect ratio. Never upscales.
fn bounded_dimensions(width: u32, height: u32, max: u32) -> (u32, u32) {
    if width >= height {
        let scale = max as f64 / width as f64;
        (max, ((height as f64 * scale).round() as u32).max(1))
    } else {
        let scale = max as f64 / height as f64;
        (((width as f64 * scale).round() as u32).max(1), max)
    }
}
