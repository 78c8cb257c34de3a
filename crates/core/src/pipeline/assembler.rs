//! Assembly of the model content sequence and processing report.

use thiserror::Error;

use super::types::{ContentElement, MediaKind, Outcome, ProcessingReport};

/// Errors that can occur while assembling the model payload.
#[derive(Debug, Error)]
pub enum AssembleError {
    /// Every declared source failed; the model is never invoked with a bare
    /// prompt when media was requested.
    #[error("No files were successfully processed")]
    NoFilesProcessed { report: ProcessingReport },
}

/// Combines the prompt with normalized media into the model content
/// sequence, and aggregates outcomes into a processing report.
///
/// The sequence begins with the prompt text, followed by one media element
/// per successful outcome, in the order the outcomes were received. Failed
/// outcomes contribute their message to the report's error list.
pub fn assemble(
    prompt: impl Into<String>,
    outcomes: Vec<Outcome>,
) -> Result<(Vec<ContentElement>, ProcessingReport), AssembleError> {
    let mut contents = vec![ContentElement::Text(prompt.into())];
    let mut report = ProcessingReport::default();

    for outcome in outcomes {
        match outcome.result {
            Ok(part) => {
                match part.source.kind {
                    MediaKind::PrimaryAudio | MediaKind::AdditionalAudio => report.audio += 1,
                    MediaKind::Image => report.images += 1,
                }
                contents.push(ContentElement::Media(part));
            }
            Err(message) => report.errors.push(message),
        }
    }

    if report.total() == 0 {
        return Err(AssembleError::NoFilesProcessed { report });
    }

    Ok((contents, report))
}
