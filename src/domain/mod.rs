// Domain layer - Battery log entities and analysis results
pub mod analysis;
pub mod battery;
pub mod session;
