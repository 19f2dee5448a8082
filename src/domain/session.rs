// Uploaded log session domain model
use super::analysis::Scope;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::sync::Arc;

const ID_LEN: usize = 16;

#[derive(Debug, Clone)]
pub struct LogSession {
    pub id: String,
    pub label: String,
    pub content: Arc<str>,
    pub selected_scope: Scope,
    pub points: usize,
    pub phases: usize,
}

impl LogSession {
    pub fn new(file_name: &str, content: String) -> Self {
        let id = content_identity(&content);
        let label = Self::format_label(file_name).unwrap_or_else(|| id.clone());
        Self {
            id,
            label,
            content: Arc::from(content),
            selected_scope: Scope::All,
            points: 0,
            phases: 0,
        }
    }

    /// Record how many points and phases the content parsed into.
    pub fn with_counts(mut self, points: usize, phases: usize) -> Self {
        self.points = points;
        self.phases = phases;
        self
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            id: self.id.clone(),
            label: self.label.clone(),
            points: self.points,
            phases: self.phases,
            selected_scope: self.selected_scope,
        }
    }

    fn format_label(file_name: &str) -> Option<String> {
        // Convert "charge_log_03.csv" to "charge log 03"
        let stem = match file_name.rsplit_once('.') {
            Some((stem, _)) if !stem.is_empty() => stem,
            _ => file_name,
        };
        let label = stem.replace('_', " ").trim().to_string();
        (!label.is_empty()).then_some(label)
    }
}

/// Identity of an uploaded file: the leading hex digits of its SHA-256 digest.
pub fn content_identity(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let mut digest = hex::encode(hasher.finalize());
    digest.truncate(ID_LEN);
    digest
}

/// Listing entry for a session, without the raw content.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub id: String,
    pub label: String,
    pub points: usize,
    pub phases: usize,
    pub selected_scope: Scope,
}
