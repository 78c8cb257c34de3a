use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use super::{handlers, summary};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(state.config().server.allowed_origin.as_deref());

    Router::new()
        .route("/api/generate-summary", post(summary::generate_summary))
        .route("/api/v1/config", get(handlers::get_config))
        .route("/health", get(handlers::health))
        .route("/metrics", get(handlers::metrics))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Restricts CORS to the configured origin; permissive when unset or
/// unparseable so a misconfigured deployment stays reachable.
fn cors_layer(allowed_origin: Option<&str>) -> CorsLayer {
    match allowed_origin {
        Some(origin) => match origin.parse::<HeaderValue>() {
            Ok(value) => CorsLayer::new()
                .allow_origin(value)
                .allow_methods(Any)
                .allow_headers(Any),
            Err(_) => {
                warn!(origin, "Invalid allowed_origin, falling back to permissive CORS");
                CorsLayer::permissive()
            }
        },
        None => CorsLayer::permissive(),
    }
}
