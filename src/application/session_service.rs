// Session service - Use cases for uploading, listing and analyzing logs
use crate::application::analysis_service::{AnalysisOptions, ParsedLog};
use crate::application::session_repository::{RepositoryError, SessionRepository};
use crate::domain::analysis::{AnalysisResult, Scope};
use crate::domain::session::{LogSession, SessionSummary};
use anyhow::Context;
use serde::Serialize;
use std::sync::Arc;

/// An analysis together with its session and the scope actually applied.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionAnalysis {
    pub session: SessionSummary,
    pub scope: Scope,
    pub analysis: AnalysisResult,
}

#[derive(Clone)]
pub struct SessionService {
    repository: Arc<dyn SessionRepository>,
    options: AnalysisOptions,
}

impl SessionService {
    pub fn new(repository: Arc<dyn SessionRepository>, options: AnalysisOptions) -> Self {
        Self {
            repository,
            options,
        }
    }

    /// Store a log and analyze it. Uploading the same content again keeps its remembered scope.
    pub async fn upload(&self, file_name: &str, content: String) -> anyhow::Result<SessionAnalysis> {
        let file_name = file_name.to_string();
        let (session, log) = tokio::task::spawn_blocking(move || {
            let log = ParsedLog::parse(&content);
            let session = LogSession::new(&file_name, content)
                .with_counts(log.points.len(), log.phases.len());
            (session, log)
        })
        .await
        .context("parsing task failed")?;

        let stored = self.repository.insert(session).await?;
        tracing::info!(
            id = %stored.id,
            label = %stored.label,
            points = stored.points,
            phases = stored.phases,
            "log uploaded"
        );

        self.run(stored, log).await
    }

    pub async fn list(&self) -> anyhow::Result<Vec<SessionSummary>> {
        let sessions = self.repository.list().await?;
        Ok(sessions.iter().map(LogSession::summary).collect())
    }

    /// Analyze a stored log. An explicit scope is remembered for later calls.
    pub async fn analyze(&self, id: &str, scope: Option<Scope>) -> anyhow::Result<SessionAnalysis> {
        let session = resolve_session(self.repository.as_ref(), id, scope).await?;
        let content = Arc::clone(&session.content);
        let log = tokio::task::spawn_blocking(move || ParsedLog::parse(&content))
            .await
            .context("parsing task failed")?;

        self.run(session, log).await
    }

    pub async fn remove(&self, id: &str) -> anyhow::Result<()> {
        self.repository.remove(id).await?;
        tracing::info!(id, "log removed");
        Ok(())
    }

    async fn run(&self, session: LogSession, log: ParsedLog) -> anyhow::Result<SessionAnalysis> {
        let options = self.options;
        let requested = session.selected_scope;
        let (scope, analysis) = tokio::task::spawn_blocking(move || {
            let scope = log.effective_scope(requested);
            (scope, log.analyze(scope, &options))
        })
        .await
        .context("analysis task failed")?;

        tracing::debug!(id = %session.id, %scope, "analysis complete");
        Ok(SessionAnalysis {
            session: session.summary(),
            scope,
            analysis,
        })
    }
}

/// Fetch a session, remembering `scope` when one is given.
pub(crate) async fn resolve_session(
    repository: &dyn SessionRepository,
    id: &str,
    scope: Option<Scope>,
) -> Result<LogSession, RepositoryError> {
    let mut session = repository.get(id).await?;
    if let Some(scope) = scope {
        repository.set_scope(id, scope).await?;
        session.selected_scope = scope;
    }
    Ok(session)
}
