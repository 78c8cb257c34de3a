//! Request and result types for summary generation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::pipeline::{MediaKind, MediaSource, ProcessingReport};

/// Template configuration controlling the generated summary's shape.
///
/// Pure input value; defaults match the reception workflow.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct TemplateConfig {
    #[serde(default = "default_format")]
    pub prescription_format: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_tone")]
    pub tone: String,
    #[serde(default = "default_sections")]
    pub sections: Vec<String>,
}

fn default_format() -> String {
    "structured".to_string()
}

fn default_language() -> String {
    "English".to_string()
}

fn default_tone() -> String {
    "professional".to_string()
}

fn default_sections() -> Vec<String> {
    [
        "Chief Complaint",
        "History",
        "Examination",
        "Diagnosis",
        "Treatment Plan",
        "Follow-up",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            prescription_format: default_format(),
            language: default_language(),
            tone: default_tone(),
            sections: default_sections(),
        }
    }
}

/// A full summary request: one primary recording, optional additional
/// recordings and images, plus templating and submitter context.
#[derive(Debug, Clone, Deserialize)]
pub struct SummaryRequest {
    pub primary_audio_url: String,
    #[serde(default)]
    pub additional_audio_urls: Vec<String>,
    #[serde(default)]
    pub image_urls: Vec<String>,
    #[serde(default)]
    pub template_config: TemplateConfig,
    #[serde(default = "default_submitted_by")]
    pub submitted_by: String,
}

fn default_submitted_by() -> String {
    "doctor".to_string()
}

impl SummaryRequest {
    /// Expands the declared URLs into ordered media sources: the primary
    /// recording first, then additional recordings, then images.
    pub fn sources(&self) -> Vec<MediaSource> {
        let mut sources = Vec::with_capacity(
            1 + self.additional_audio_urls.len() + self.image_urls.len(),
        );

        sources.push(MediaSource::new(
            &self.primary_audio_url,
            MediaKind::PrimaryAudio,
            0,
        ));
        for (i, url) in self.additional_audio_urls.iter().enumerate() {
            sources.push(MediaSource::new(url, MediaKind::AdditionalAudio, i + 1));
        }
        for (i, url) in self.image_urls.iter().enumerate() {
            sources.push(MediaSource::new(url, MediaKind::Image, i));
        }

        sources
    }
}

/// The generated summary plus metadata about how it was produced.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryResult {
    pub summary: String,
    pub model: String,
    pub timestamp: DateTime<Utc>,
    pub files_processed: ProcessingReport,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_defaults() {
        let config = TemplateConfig::default();
        assert_eq!(config.prescription_format, "structured");
        assert_eq!(config.language, "English");
        assert_eq!(config.tone, "professional");
        assert_eq!(config.sections.len(), 6);
    }

    #[test]
    fn test_request_deserialization_with_defaults() {
        let json = r#"{"primary_audio_url": "http://x/rec.mp3"}"#;
        let request: SummaryRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.primary_audio_url, "http://x/rec.mp3");
        assert!(request.additional_audio_urls.is_empty());
        assert!(request.image_urls.is_empty());
        assert_eq!(request.submitted_by, "doctor");
        assert_eq!(request.template_config, TemplateConfig::default());
    }

    #[test]
    fn test_sources_expansion_order_and_ordinals() {
        let request = SummaryRequest {
            primary_audio_url: "http://x/p.mp3".to_string(),
            additional_audio_urls: vec!["http://x/a1.mp3".to_string(), "http://x/a2.mp3".to_string()],
            image_urls: vec!["http://x/i1.png".to_string()],
            template_config: TemplateConfig::default(),
            submitted_by: "doctor".to_string(),
        };

        let sources = request.sources();
        assert_eq!(sources.len(), 4);
        assert_eq!(sources[0].kind, MediaKind::PrimaryAudio);
        assert_eq!(sources[0].ordinal, 0);
        assert_eq!(sources[1].kind, MediaKind::AdditionalAudio);
        assert_eq!(sources[1].ordinal, 1);
        assert_eq!(sources[2].ordinal, 2);
        assert_eq!(sources[3].kind, MediaKind::Image);
        assert_eq!(sources[3].ordinal, 0);
    }

    #[test]
    fn test_result_serialization_shape() {
        let result = SummaryResult {
            summary: "All good".to_string(),
            model: "gemini-2.5-flash-preview-05-20".to_string(),
            timestamp: Utc::now(),
            files_processed: ProcessingReport {
                audio: 1,
                images: 0,
                errors: vec![],
            },
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["summary"], "All good");
        assert_eq!(json["files_processed"]["audio"], 1);
        assert!(json["timestamp"].is_string());
    }
}
