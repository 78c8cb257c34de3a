//! Gemini API client using inline base64 media data.

use async_trait::async_trait;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::debug;

use crate::config::GeminiConfig;
use crate::metrics;
use crate::pipeline::ContentElement;

use super::{ModelClient, ModelError};

/// Client for the Gemini generateContent REST API.
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    api_base: String,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_default();
        Self {
            client,
            api_key: config.api_key,
            model: config.model,
            api_base: config.api_base,
        }
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    fn build_request(contents: &[ContentElement]) -> GeminiRequest {
        let parts = contents
            .iter()
            .map(|element| match element {
                ContentElement::Text(text) => GeminiPart {
                    text: Some(text.clone()),
                    inline_data: None,
                },
                ContentElement::Media(part) => GeminiPart {
                    text: None,
                    inline_data: Some(InlineData {
                        mime_type: part.mime_type.clone(),
                        data: base64::engine::general_purpose::STANDARD.encode(&part.bytes),
                    }),
                },
            })
            .collect();

        GeminiRequest {
            contents: vec![GeminiContent { parts }],
        }
    }
}

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize)]
struct GeminiPart {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

#[derive(Debug, Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiCandidateContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidateContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorDetail {
    message: String,
}

#[async_trait]
impl ModelClient for GeminiClient {
    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, contents: &[ContentElement]) -> Result<String, ModelError> {
        let start = Instant::now();
        let request = Self::build_request(contents);

        let response = self
            .client
            .post(format!(
                "{}/v1beta/models/{}:generateContent",
                self.api_base, self.model
            ))
            .header("x-goog-api-key", &self.api_key)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                metrics::MODEL_CALLS.with_label_values(&["error"]).inc();
                ModelError::Http(e.to_string())
            })?;

        let status = response.status().as_u16();

        if status != 200 {
            metrics::MODEL_CALLS.with_label_values(&["error"]).inc();
            let error_text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<GeminiError>(&error_text)
                .map(|e| e.error.message)
                .unwrap_or(error_text);
            return Err(ModelError::Api { status, message });
        }

        let gemini_response: GeminiResponse = response.json().await.map_err(|e| {
            metrics::MODEL_CALLS.with_label_values(&["error"]).inc();
            ModelError::Json(e.to_string())
        })?;

        let text = gemini_response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| {
                c.parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.is_empty() {
            metrics::MODEL_CALLS.with_label_values(&["error"]).inc();
            return Err(ModelError::EmptyResponse);
        }

        debug!(
            model = %self.model,
            chars = text.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Model call complete"
        );
        metrics::MODEL_CALLS.with_label_values(&["ok"]).inc();
        metrics::MODEL_CALL_DURATION
            .with_label_values(&[])
            .observe(start.elapsed().as_secs_f64());

        Ok(text)
    }
}
