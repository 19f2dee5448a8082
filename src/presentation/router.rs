// Router configuration
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    delete_log, get_analysis, health_check, list_logs, stream_analysis, upload_log,
};
use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

// Responses are compressed by the handlers themselves, so no CompressionLayer here.
pub fn create_router(state: Arc<AppState>, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/logs", get(list_logs).post(upload_log))
        .route("/logs/:id", delete(delete_log))
        .route("/logs/:id/analysis", get(get_analysis))
        .route("/logs/:id/stream", get(stream_analysis))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::analysis_service::AnalysisOptions;
    use crate::application::session_service::SessionService;
    use crate::application::streaming_service::StreamingAnalysisService;
    use crate::infrastructure::memory_repository::InMemorySessionRepository;

    #[test]
    fn test_router_creation() {
        let repository = Arc::new(InMemorySessionRepository::new());
        let options = AnalysisOptions::default();
        let state = Arc::new(AppState {
            session_service: SessionService::new(repository.clone(), options),
            streaming_service: StreamingAnalysisService::new(repository, options, 8),
        });
        let _router = create_router(state, 1024);
    }
}
