//! Generative model client abstraction and the Gemini implementation.
//!
//! The model is an opaque collaborator: this module only knows how to send
//! an ordered content sequence (text + inline media) and get text back.
//! The client is a long-lived shared handle with no per-request state and
//! nothing to tear down at shutdown.

mod gemini;

use async_trait::async_trait;

use crate::pipeline::ContentElement;

pub use gemini::GeminiClient;

/// Error type for generative model calls.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(String),

    #[error("Model returned no text")]
    EmptyResponse,
}

/// Trait for generative model clients.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Model identifier reported to callers (e.g. "gemini-2.5-flash-preview-05-20").
    fn model(&self) -> &str;

    /// Sends the content sequence and returns the generated text.
    async fn generate(&self, contents: &[ContentElement]) -> Result<String, ModelError>;
}
