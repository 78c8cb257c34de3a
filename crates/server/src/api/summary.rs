use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use std::sync::Arc;

use mediscribe_core::{ProcessingReport, SummaryError, SummaryRequest, SummaryResult};

use crate::state::AppState;

/// Error body carrying the per-file report so callers can see which
/// sources failed even when the request as a whole did not succeed.
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub detail: String,
    pub files_processed: ProcessingReport,
}

pub async fn generate_summary(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SummaryRequest>,
) -> Result<Json<SummaryResult>, (StatusCode, Json<ErrorResponse>)> {
    match state.service().generate(request).await {
        Ok(result) => Ok(Json(result)),
        Err(err) => Err(error_response(err)),
    }
}

fn error_response(err: SummaryError) -> (StatusCode, Json<ErrorResponse>) {
    let detail = err.to_string();
    match err {
        SummaryError::NoFilesProcessed { report } => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "No files were successfully processed".to_string(),
                detail,
                files_processed: report,
            }),
        ),
        SummaryError::Model { report, .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: "Failed to generate summary".to_string(),
                detail,
                files_processed: report,
            }),
        ),
    }
}
