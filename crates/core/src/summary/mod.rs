//! Consultation summary generation.
//!
//! Ties the media pipeline and the model client together: expand the
//! request into media sources, fan out, assemble the payload, call the
//! model, and return the summary with its processing report.

mod prompt;
mod service;
mod types;

pub use prompt::build_prompt;
pub use service::{SummaryError, SummaryService};
pub use types::{SummaryRequest, SummaryResult, TemplateConfig};
