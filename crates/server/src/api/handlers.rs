use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use once_cell::sync::Lazy;
use prometheus::{Encoder, Registry, TextEncoder};
use serde::Serialize;
use std::sync::Arc;
use tracing::error;

use mediscribe_core::{metrics::all_metrics, SanitizedConfig};

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub gemini_client: String,
    pub ffmpeg: String,
    pub model: String,
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    // The model client is constructed at startup and outlives every
    // request; a missing transcoder degrades audio handling only.
    let (status, ffmpeg) = if state.ffmpeg_available() {
        ("healthy", "available")
    } else {
        ("degraded", "unavailable")
    };
    Json(HealthResponse {
        status: status.to_string(),
        timestamp: Utc::now().to_rfc3339(),
        gemini_client: "connected".to_string(),
        ffmpeg: ffmpeg.to_string(),
        model: state.model().to_string(),
    })
}

pub async fn get_config(State(state): State<Arc<AppState>>) -> Json<SanitizedConfig> {
    Json(state.sanitized_config())
}

/// Registry holding every collector in the crate. Built once; collectors
/// are process-wide statics, so a per-request registry would double count.
static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    for collector in all_metrics() {
        if let Err(e) = registry.register(collector) {
            error!("Failed to register metric: {}", e);
        }
    }
    registry
});

pub async fn metrics() -> Result<String, StatusCode> {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    encoder
        .encode(&REGISTRY.gather(), &mut buffer)
        .map_err(|e| {
            error!("Failed to encode metrics: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;
    String::from_utf8(buffer).map_err(|e| {
        error!("Metrics were not valid UTF-8: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })
}
