// Application state for HTTP handlers
use crate::application::session_service::SessionService;
use crate::application::streaming_service::StreamingAnalysisService;

#[derive(Clone)]
pub struct AppState {
    pub session_service: SessionService,
    pub streaming_service: StreamingAnalysisService,
}
