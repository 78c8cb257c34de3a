//! Testing utilities and mock implementations for integration tests.
//!
//! This module provides mock implementations of the external seams
//! (fetcher, normalizers, model client), allowing full pipeline and HTTP
//! tests without network access, ffmpeg, or a Gemini API key.
//!
//! # Example
//!
//! ```rust,ignore
//! use mediscribe_core::testing::{MockFetcher, MockAudioNormalizer, MockImageNormalizer, MockModelClient};
//!
//! let fetcher = MockFetcher::new();
//! fetcher.with_file("http://cdn/rec.mp3", b"bytes".to_vec(), Some("audio/mpeg"));
//! fetcher.with_timeout("http://cdn/slow.mp3");
//!
//! let model = MockModelClient::with_response("Patient is fine.");
//! // Use in MediaPipeline / SummaryService...
//! ```

mod mock_fetcher;
mod mock_model;
mod mock_normalizer;

pub use mock_fetcher::MockFetcher;
pub use mock_model::MockModelClient;
pub use mock_normalizer::{MockAudioNormalizer, MockImageNormalizer};
