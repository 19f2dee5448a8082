// Repository trait for uploaded log sessions
use crate::domain::analysis::Scope;
use crate::domain::session::LogSession;
use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    #[error("session not found: {0}")]
    NotFound(String),
    #[error("session store lock poisoned")]
    Poisoned,
}

#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Store a session and return the stored copy.
    /// A session with the same id keeps its remembered scope and takes the new label.
    async fn insert(&self, session: LogSession) -> Result<LogSession, RepositoryError>;

    async fn get(&self, id: &str) -> Result<LogSession, RepositoryError>;

    /// All sessions ordered by label
    async fn list(&self) -> Result<Vec<LogSession>, RepositoryError>;

    /// Remember the scope last chosen for a session
    async fn set_scope(&self, id: &str, scope: Scope) -> Result<(), RepositoryError>;

    async fn remove(&self, id: &str) -> Result<(), RepositoryError>;
}
