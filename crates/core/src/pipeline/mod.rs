//! Fetch+normalize fan-out for a single summary request.
//!
//! Every declared media source becomes one concurrent task that downloads
//! the file and normalizes it for its kind. Task failures are captured as
//! per-source outcomes and never abort the batch. The orchestrator waits
//! for every task before returning, and outcomes come back in declaration
//! order, so the assembled report is deterministic across runs.

mod assembler;
mod orchestrator;
mod types;

pub use assembler::{assemble, AssembleError};
pub use orchestrator::MediaPipeline;
pub use types::{ContentElement, MediaKind, MediaPart, MediaSource, Outcome, ProcessingReport};
