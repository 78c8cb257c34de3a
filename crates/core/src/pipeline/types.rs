//! Data types flowing through the media pipeline.

use serde::Serialize;

/// The role a declared media source plays in the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    PrimaryAudio,
    AdditionalAudio,
    Image,
}

impl MediaKind {
    /// Whether this kind goes through the audio normalizer.
    pub fn is_audio(&self) -> bool {
        matches!(self, MediaKind::PrimaryAudio | MediaKind::AdditionalAudio)
    }

    /// Label used for metrics.
    pub fn metric_label(&self) -> &'static str {
        match self {
            MediaKind::PrimaryAudio => "primary_audio",
            MediaKind::AdditionalAudio => "additional_audio",
            MediaKind::Image => "image",
        }
    }
}

/// One remote artifact declared by the caller. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaSource {
    pub url: String,
    pub kind: MediaKind,
    /// Position within the source's kind (primary audio is always 0).
    pub ordinal: usize,
}

impl MediaSource {
    pub fn new(url: impl Into<String>, kind: MediaKind, ordinal: usize) -> Self {
        Self {
            url: url.into(),
            kind,
            ordinal,
        }
    }

    /// Stable human-readable identifier used in outcomes and error messages.
    pub fn identifier(&self) -> String {
        match self.kind {
            MediaKind::PrimaryAudio => "primary audio".to_string(),
            MediaKind::AdditionalAudio => format!("additional audio {}", self.ordinal),
            MediaKind::Image => format!("image {}", self.ordinal + 1),
        }
    }
}

/// A normalized media part ready for inclusion in the model payload.
#[derive(Debug, Clone)]
pub struct MediaPart {
    pub bytes: Vec<u8>,
    /// Fixed per kind: `audio/wav` or `image/png`.
    pub mime_type: String,
    pub source: MediaSource,
}

/// The terminal result of one source's fetch+normalize task.
///
/// Failures are carried as messages, never as live errors: by the time an
/// outcome exists, nothing can propagate past the task boundary anymore.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub source: MediaSource,
    pub result: Result<MediaPart, String>,
}

impl Outcome {
    pub fn identifier(&self) -> String {
        self.source.identifier()
    }

    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Aggregate counts and error list for a processed request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProcessingReport {
    pub audio: u32,
    pub images: u32,
    pub errors: Vec<String>,
}

impl ProcessingReport {
    /// Total successfully processed parts.
    pub fn total(&self) -> u32 {
        self.audio + self.images
    }
}

/// One element of the content sequence sent to the generative model.
#[derive(Debug, Clone)]
pub enum ContentElement {
    Text(String),
    Media(MediaPart),
}
