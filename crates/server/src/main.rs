use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mediscribe_core::{
    load_config, validate_config, FfmpegAudioNormalizer, GeminiClient, HttpFetcher, MediaPipeline,
    RasterImageNormalizer, SummaryService,
};

use mediscribe_server::{create_router, AppState};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine config path
    let config_path = std::env::var("MEDISCRIBE_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    // Load configuration
    info!("Loading configuration from {:?}", config_path);
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    // Validate configuration
    validate_config(&config).context("Configuration validation failed")?;

    info!("Configuration loaded successfully");
    info!("Model: {}", config.gemini.model);

    // Log a config fingerprint so deployments can be told apart without
    // ever logging the key itself.
    let config_json = serde_json::to_string(&config).unwrap_or_default();
    let config_hash = format!("{:x}", Sha256::digest(config_json.as_bytes()));
    info!("Config hash: {}", &config_hash[..16]);

    // Build the media pipeline
    let fetcher = Arc::new(HttpFetcher::new(config.fetcher.clone()));
    let audio = Arc::new(FfmpegAudioNormalizer::new(config.normalizer.clone()));
    let image = Arc::new(RasterImageNormalizer::new(&config.normalizer));

    // Probe ffmpeg at startup. A missing binary is reported through
    // /health rather than aborting; audio sources will fail per-request.
    let ffmpeg_available = match audio.validate().await {
        Ok(()) => {
            info!("ffmpeg found at {}", config.normalizer.ffmpeg_path.display());
            true
        }
        Err(e) => {
            warn!("ffmpeg probe failed, audio processing unavailable: {}", e);
            false
        }
    };

    let pipeline = MediaPipeline::new(fetcher, audio, image)
        .with_max_parallel(config.pipeline.max_parallel_tasks);

    let model = Arc::new(GeminiClient::new(config.gemini.clone()));
    let service = SummaryService::new(pipeline, model);

    // Create app state and router
    let state = Arc::new(AppState::new(config.clone(), service, ffmpeg_available));
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(config.server.host, config.server.port);
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutting down...");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
