// In-memory session repository implementation
use crate::application::session_repository::{RepositoryError, SessionRepository};
use crate::domain::analysis::Scope;
use crate::domain::session::LogSession;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

#[derive(Debug, Default)]
pub struct InMemorySessionRepository {
    sessions: RwLock<HashMap<String, LogSession>>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn insert(&self, session: LogSession) -> Result<LogSession, RepositoryError> {
        let mut sessions = self.sessions.write().map_err(|_| RepositoryError::Poisoned)?;
        let stored = sessions
            .entry(session.id.clone())
            .and_modify(|existing| existing.label = session.label.clone())
            .or_insert(session);
        Ok(stored.clone())
    }

    async fn get(&self, id: &str) -> Result<LogSession, RepositoryError> {
        let sessions = self.sessions.read().map_err(|_| RepositoryError::Poisoned)?;
        sessions
            .get(id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))
    }

    async fn list(&self) -> Result<Vec<LogSession>, RepositoryError> {
        let sessions = self.sessions.read().map_err(|_| RepositoryError::Poisoned)?;
        let mut all: Vec<LogSession> = sessions.values().cloned().collect();
        all.sort_by(|a, b| a.label.cmp(&b.label).then_with(|| a.id.cmp(&b.id)));
        Ok(all)
    }

    async fn set_scope(&self, id: &str, scope: Scope) -> Result<(), RepositoryError> {
        let mut sessions = self.sessions.write().map_err(|_| RepositoryError::Poisoned)?;
        let session = sessions
            .get_mut(id)
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))?;
        session.selected_scope = scope;
        Ok(())
    }

    async fn remove(&self, id: &str) -> Result<(), RepositoryError> {
        let mut sessions = self.sessions.write().map_err(|_| RepositoryError::Poisoned)?;
        sessions
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(name: &str, content: &str) -> LogSession {
        LogSession::new(name, content.to_string())
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let repo = InMemorySessionRepository::new();
        let stored = repo.insert(session("a.csv", "1;2;3;4;5;6;7")).await.unwrap();
        assert_eq!(repo.get(&stored.id).await.unwrap().label, "a");
        assert_eq!(
            repo.get("missing").await.unwrap_err(),
            RepositoryError::NotFound("missing".to_string())
        );
    }

    #[tokio::test]
    async fn test_reinsert_keeps_scope() {
        let repo = InMemorySessionRepository::new();
        let stored = repo.insert(session("a.csv", "1;2;3;4;5;6;7")).await.unwrap();
        repo.set_scope(&stored.id, Scope::Phase(2)).await.unwrap();

        let again = repo.insert(session("renamed.csv", "1;2;3;4;5;6;7")).await.unwrap();
        assert_eq!(again.id, stored.id);
        assert_eq!(again.label, "renamed");
        assert_eq!(again.selected_scope, Scope::Phase(2));
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_list_sorted_by_label() {
        let repo = InMemorySessionRepository::new();
        repo.insert(session("b.csv", "2")).await.unwrap();
        repo.insert(session("a.csv", "1")).await.unwrap();
        let labels: Vec<String> = repo.list().await.unwrap().into_iter().map(|s| s.label).collect();
        assert_eq!(labels, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_remove() {
        let repo = InMemorySessionRepository::new();
        let stored = repo.insert(session("a.csv", "1")).await.unwrap();
        repo.remove(&stored.id).await.unwrap();
        assert!(repo.list().await.unwrap().is_empty());
        assert!(matches!(
            repo.remove(&stored.id).await,
            Err(RepositoryError::NotFound(_))
        ));
        assert!(matches!(
            repo.set_scope(&stored.id, Scope::All).await,
            Err(RepositoryError::NotFound(_))
        ));
    }
}
