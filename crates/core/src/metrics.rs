//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - URL fetcher (downloads, bytes)
//! - Normalizers (audio transcodes, image conversions)
//! - Pipeline (per-source outcomes)
//! - Model client (generate calls)

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts};

// =============================================================================
// Fetcher
// =============================================================================

/// Remote file downloads by result.
pub static FETCHES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("mediscribe_fetches_total", "Total remote file downloads"),
        &["result"], // "ok", "http_error", "transport_error"
    )
    .unwrap()
});

/// Bytes downloaded from remote URLs.
pub static FETCHED_BYTES: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "mediscribe_fetched_bytes_total",
        "Total bytes downloaded from remote URLs",
    )
    .unwrap()
});

// =============================================================================
// Normalizers
// =============================================================================

/// Normalization attempts by media kind and result.
pub static NORMALIZATIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "mediscribe_normalizations_total",
            "Total media normalization attempts",
        ),
        &["kind", "result"], // kind: "audio", "image"; result: "ok", "error"
    )
    .unwrap()
});

/// Normalization duration by media kind.
pub static NORMALIZATION_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "mediscribe_normalization_duration_seconds",
            "Duration of media normalization",
        )
        .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        &["kind"],
    )
    .unwrap()
});

// =============================================================================
// Pipeline
// =============================================================================

/// Per-source pipeline outcomes.
pub static SOURCE_OUTCOMES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "mediscribe_source_outcomes_total",
            "Per-source fetch+normalize outcomes",
        ),
        &["kind", "result"], // kind: "primary_audio", "additional_audio", "image"
    )
    .unwrap()
});

// =============================================================================
// Model client
// =============================================================================

/// Generative model calls by result.
pub static MODEL_CALLS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "mediscribe_model_calls_total",
            "Total generative model invocations",
        ),
        &["result"], // "ok", "error"
    )
    .unwrap()
});

/// Generative model call duration.
pub static MODEL_CALL_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "mediscribe_model_call_duration_seconds",
            "Duration of generative model calls",
        )
        .buckets(vec![0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0, 120.0]),
        &[],
    )
    .unwrap()
});

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(FETCHES_TOTAL.clone()),
        Box::new(FETCHED_BYTES.clone()),
        Box::new(NORMALIZATIONS_TOTAL.clone()),
        Box::new(NORMALIZATION_DURATION.clone()),
        Box::new(SOURCE_OUTCOMES.clone()),
        Box::new(MODEL_CALLS.clone()),
        Box::new(MODEL_CALL_DURATION.clone()),
    ]
}
