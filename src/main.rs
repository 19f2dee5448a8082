// Main entry point - Dependency injection and server setup
use std::sync::Arc;

use battery_log_analyzer::application::session_service::SessionService;
use battery_log_analyzer::application::streaming_service::StreamingAnalysisService;
use battery_log_analyzer::infrastructure::config::load_config;
use battery_log_analyzer::infrastructure::memory_repository::InMemorySessionRepository;
use battery_log_analyzer::presentation::app_state::AppState;
use battery_log_analyzer::presentation::router::create_router;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = load_config()?;
    let options = config.analysis_options()?;

    // Create repository (infrastructure layer)
    let repository = Arc::new(InMemorySessionRepository::new());

    // Create services (application layer)
    let session_service = SessionService::new(repository.clone(), options);
    let streaming_service = StreamingAnalysisService::new(
        repository.clone(),
        options,
        config.streaming.channel_capacity,
    );

    // Create application state
    let state = Arc::new(AppState {
        session_service,
        streaming_service,
    });

    // Build router (presentation layer)
    let router = create_router(state, config.server.max_upload_bytes);

    // Start server
    let addr = config.socket_addr()?;
    tracing::info!("Starting battery-log-analyzer service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
