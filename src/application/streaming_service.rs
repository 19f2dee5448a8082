// Streaming analysis service - Progressive delivery of analysis sections
use crate::application::analysis_service::{AnalysisOptions, ParsedLog};
use crate::application::session_repository::{RepositoryError, SessionRepository};
use crate::application::session_service::resolve_session;
use crate::application::stats::{cc_cv, charge, efficiency, params, phase_summary, power, thermal};
use crate::domain::analysis::{PhaseSummaryRow, Scope};
use crate::domain::battery::{Phase, PhaseType};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;

const SECTION_COUNT: usize = 6;

/// Phase header sent ahead of any numbers so a client can lay out its view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseOutline {
    pub index: usize,
    #[serde(rename = "type")]
    pub phase_type: PhaseType,
    pub label: String,
    pub start_index: usize,
    pub end_index: usize,
    pub duration: i64,
    pub points: usize,
}

impl PhaseOutline {
    fn new(index: usize, phase: &Phase) -> Self {
        Self {
            index,
            phase_type: phase.phase_type,
            label: phase.label.clone(),
            start_index: phase.start_index,
            end_index: phase.end_index,
            duration: phase.duration,
            points: phase.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum StreamMessage {
    Skeleton {
        session_id: String,
        label: String,
        scope: Scope,
        phases: Vec<PhaseOutline>,
    },
    PhasesSummary {
        rows: Vec<PhaseSummaryRow>,
    },
    Section {
        name: &'static str,
        section: serde_json::Value,
    },
    Complete {
        sections: usize,
        duration_ms: u64,
    },
}

#[derive(Clone)]
pub struct StreamingAnalysisService {
    repository: Arc<dyn SessionRepository>,
    options: AnalysisOptions,
    channel_capacity: usize,
}

impl StreamingAnalysisService {
    pub fn new(
        repository: Arc<dyn SessionRepository>,
        options: AnalysisOptions,
        channel_capacity: usize,
    ) -> Self {
        Self {
            repository,
            options,
            channel_capacity: channel_capacity.max(1),
        }
    }

    /// Stream a skeleton, the phase table, each analytics block, then a completion event.
    pub async fn stream_analysis(
        &self,
        id: &str,
        scope: Option<Scope>,
    ) -> Result<mpsc::Receiver<StreamMessage>, RepositoryError> {
        let session = resolve_session(self.repository.as_ref(), id, scope).await?;
        let (tx, rx) = mpsc::channel(self.channel_capacity);
        let options = self.options;
        let start_time = Instant::now();

        tokio::task::spawn_blocking(move || {
            let log = ParsedLog::parse(&session.content);
            let scope = log.effective_scope(session.selected_scope);

            let skeleton = StreamMessage::Skeleton {
                session_id: session.id.clone(),
                label: session.label.clone(),
                scope,
                phases: log
                    .phases
                    .iter()
                    .enumerate()
                    .map(|(index, phase)| PhaseOutline::new(index, phase))
                    .collect(),
            };
            let rows = phase_summary::summarize(&log.phases, &options.utc_offset);

            let data = log.scoped(scope);
            let delivered = tx.blocking_send(skeleton).is_ok()
                && tx.blocking_send(StreamMessage::PhasesSummary { rows }).is_ok()
                && send_section(&tx, "chargeSummary", &charge::section(data))
                && send_section(&tx, "powerQuality", &power::section(data))
                && send_section(&tx, "efficiency", &efficiency::section(data))
                && send_section(&tx, "calculatedParams", &params::section(data))
                && send_section(&tx, "ccCvPhases", &cc_cv::table(data))
                && send_section(&tx, "thermalCharacteristics", &thermal::table(data));

            if !delivered {
                tracing::debug!(id = %session.id, "stream receiver dropped");
                return;
            }

            let duration_ms = start_time.elapsed().as_millis() as u64;
            let complete = StreamMessage::Complete {
                sections: SECTION_COUNT,
                duration_ms,
            };
            if tx.blocking_send(complete).is_ok() {
                tracing::debug!(id = %session.id, %scope, duration_ms, "analysis streamed");
            }
        });

        Ok(rx)
    }
}

/// Returns false once the receiver is gone.
fn send_section<T: Serialize>(
    tx: &mpsc::Sender<StreamMessage>,
    name: &'static str,
    section: &T,
) -> bool {
    match serde_json::to_value(section) {
        Ok(section) => tx
            .blocking_send(StreamMessage::Section { name, section })
            .is_ok(),
        Err(e) => {
            tracing::warn!("Failed to serialize section {}: {}", name, e);
            true
        }
    }
}
