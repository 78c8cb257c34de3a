//! Normalization of fetched media into canonical formats.
//!
//! Every audio input is transcoded to single-channel 16 kHz signed 16-bit
//! PCM WAV via an external ffmpeg process. Every image input is decoded,
//! flattened to opaque RGB, bounded to a maximum dimension and re-encoded
//! as PNG. The output formats are fixed; callers never pick a target.

mod audio;
mod config;
mod error;
mod image;
mod traits;

pub use audio::FfmpegAudioNormalizer;
pub use config::NormalizerConfig;
pub use error::NormalizeError;
pub use image::RasterImageNormalizer;
pub use traits::{AudioNormalizer, ImageNormalizer};

/// MIME type of all normalized audio output.
pub const WAV_MIME: &str = "audio/wav";

/// MIME type of all normalized image output.
pub const PNG_MIME: &str = "image/png";
