// Application layer - Analysis pipeline and use cases over uploaded logs
pub mod analysis_service;
pub mod parser;
pub mod phase_detector;
pub mod session_repository;
pub mod session_service;
pub mod stats;
pub mod streaming_service;
