//! Mock model client for testing.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::model::{ModelClient, ModelError};
use crate::pipeline::ContentElement;

/// Mock implementation of the [`ModelClient`] trait.
///
/// Returns a canned response (or a configured error) and records every
/// content sequence it receives, so tests can assert the model was or was
/// not invoked and with what payload.
pub struct MockModelClient {
    response: String,
    fail_with: Option<ModelError>,
    model: String,
    calls: Mutex<Vec<Vec<ContentElement>>>,
}

impl MockModelClient {
    /// A client that answers every call with `response`.
    pub fn with_response(response: &str) -> Self {
        Self {
            response: response.to_string(),
            fail_with: None,
            model: "mock-model".to_string(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// A client that fails every call with the given error.
    pub fn failing(error: ModelError) -> Self {
        Self {
            response: String::new(),
            fail_with: Some(error),
            model: "mock-model".to_string(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// All content sequences received so far.
    pub fn calls(&self) -> Vec<Vec<ContentElement>> {
        self.calls.lock().unwrap().clone()
    }
}

/// ModelError does not derive Clone; rebuild it field by field.
fn clone_error(error: &ModelError) -> ModelError {
    match error {
        ModelError::Http(s) => ModelError::Http(s.clone()),
        ModelError::Api { status, message } => ModelError::Api {
            status: *status,
            message: message.clone(),
        },
        ModelError::Json(s) => ModelError::Json(s.clone()),
        ModelError::EmptyResponse => ModelError::EmptyResponse,
    }
}

#[async_trait]
impl ModelClient for MockModelClient {
    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, contents: &[ContentElement]) -> Result<String, ModelError> {
        self.calls.lock().unwrap().push(contents.to_vec());
        match &self.fail_with {
            Some(error) => Err(clone_error(error)),
            None => Ok(self.response.clone()),
        }
    }
}
