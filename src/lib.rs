//! Battery charge/discharge log analysis.
//!
//! The core (`application::parser`, `application::phase_detector`, `application::stats`
//! and `application::analysis_service`) is synchronous and pure. The session, streaming and
//! HTTP layers around it follow a domain / application / infrastructure / presentation split.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

pub use application::analysis_service::{analyze, analyze_with, AnalysisOptions, ParsedLog};
pub use domain::analysis::{AnalysisResult, Scope};
