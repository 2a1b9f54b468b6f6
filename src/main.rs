//! student-gateway server entry point.
//!
//! Loads the snapshot, then starts the Axum HTTP server.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use student_gateway::api;
use student_gateway::app_state::AppState;
use student_gateway::config::GatewayConfig;
use student_gateway::domain::StudentStore;
use student_gateway::persistence::SnapshotFile;
use student_gateway::service::StudentService;
use student_gateway::summarizer::HttpSummarizer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json")) {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    // Load configuration
    let config = GatewayConfig::from_env().context("invalid LISTEN_ADDR")?;
    tracing::info!(addr = %config.listen_addr, "starting student-gateway");

    // Build domain layer. The snapshot is fully loaded before the store
    // is shared with any handler.
    let store = if config.persistence_enabled {
        let snapshot = SnapshotFile::new(&config.data_file);
        let path = snapshot.path().to_path_buf();
        let store = StudentStore::open(snapshot)
            .await
            .with_context(|| format!("failed to load snapshot {}", path.display()))?;
        tracing::info!(
            path = %path.display(),
            students = store.len().await,
            "snapshot loaded"
        );
        store
    } else {
        tracing::warn!("persistence disabled, students are kept in memory only");
        StudentStore::in_memory()
    };

    // Build service layer
    let summarizer =
        HttpSummarizer::from_config(&config.summarizer).context("failed to build summarizer")?;
    tracing::info!(url = summarizer.url(), "summarizer configured");
    let student_service = Arc::new(StudentService::new(
        Arc::new(store),
        Arc::new(summarizer),
        Duration::from_secs(config.summarizer.timeout_secs),
    ));

    // Build router
    let app = api::build_app(
        AppState { student_service },
        Duration::from_secs(config.request_timeout_secs),
    );

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

/// Resolves on Ctrl-C so in-flight requests (and their snapshot writes)
/// finish before the process exits.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
