//! Health Assistant - Main Entry Point
//!
//! Loads the three disease models, then serves the prediction forms over HTTP.
//! Startup aborts if any model is missing, corrupt or untrained.

use anyhow::{Context, Result};
use health_assistant::{
    config::{AppConfig, LogFormat},
    metrics::{MetricsReporter, PredictionMetrics},
    models::{ModelRegistry, PredictionDispatcher},
    web::{self, AppState},
};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = AppConfig::load()?;

    // Initialize logging
    let filter = EnvFilter::from_default_env()
        .add_directive(format!("health_assistant={}", config.logging.level).parse()?)
        .add_directive("tower_http=info".parse()?);
    match config.logging.format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }

    info!("Starting Health Assistant");
    info!(
        models_dir = %config.models.models_dir.display(),
        onnx_threads = config.models.onnx_threads,
        "Configuration loaded successfully"
    );

    // Load models; any failure stops the application. The registry logs each failure.
    let registry = ModelRegistry::load(&config.models.models_dir, config.models.onnx_threads)
        .map(Arc::new)
        .context("Refusing to start")?;

    let metrics = Arc::new(PredictionMetrics::new());
    let dispatcher = Arc::new(PredictionDispatcher::new(registry, metrics.clone()));

    // Start metrics reporter
    let reporter = MetricsReporter::new(metrics.clone(), config.metrics.report_interval_secs);
    tokio::spawn(reporter.start());

    let app = web::router(AppState::new(dispatcher, metrics.clone()));

    let addr = config.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Health Assistant listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Health Assistant shutting down...");
    metrics.print_summary();

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
