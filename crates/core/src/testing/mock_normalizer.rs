//! Mock normalizers for testing.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::normalizer::{AudioNormalizer, ImageNormalizer, NormalizeError};

/// Mock audio normalizer.
///
/// By default echoes the input prefixed with a WAV marker; can be
/// configured to fail every call with a transcode error.
#[derive(Default)]
pub struct MockAudioNormalizer {
    fail_with: Option<String>,
    calls: AtomicUsize,
}

impl MockAudioNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A normalizer that fails every call with the given stderr text.
    pub fn failing(stderr: &str) -> Self {
        Self {
            fail_with: Some(stderr.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of normalize calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl AudioNormalizer for MockAudioNormalizer {
    async fn normalize(&self, bytes: Vec<u8>) -> Result<Vec<u8>, NormalizeError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        if let Some(ref stderr) = self.fail_with {
            return Err(NormalizeError::audio_transcode(stderr.clone()));
        }
        let mut out = b"RIFF-mock".to_vec();
        out.extend_from_slice(&bytes);
        Ok(out)
    }
}

/// Mock image normalizer, mirror of [`MockAudioNormalizer`].
#[derive(Default)]
pub struct MockImageNormalizer {
    fail_with: Option<String>,
    calls: AtomicUsize,
}

impl MockImageNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A normalizer that fails every call with a decode error.
    pub fn failing(reason: &str) -> Self {
        Self {
            fail_with: Some(reason.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of normalize calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl ImageNormalizer for MockImageNormalizer {
    async fn normalize(&self, bytes: Vec<u8>) -> Result<Vec<u8>, NormalizeError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        if let Some(ref reason) = self.fail_with {
            return Err(NormalizeError::image_decode(reason.clone()));
        }
        let mut out = b"PNG-mock".to_vec();
        out.extend_from_slice(&bytes);
        Ok(out)
    }
}
