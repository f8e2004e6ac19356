//! In-memory session repository.
//!
//! Backs the single-node deployment when no database is configured,
//! and gives tests a fast, deterministic store. The version check in
//! `update` behaves exactly like the Postgres adapter's conditional
//! write, so concurrency tests exercise the same semantics.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, SessionId};
use crate::domain::session::Session;
use crate::ports::SessionRepository;

/// Session store backed by a process-local map.
pub struct InMemorySessionRepository {
    sessions: RwLock<HashMap<SessionId, Session>>,
}

impl InMemorySessionRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the number of stored sessions (for test assertions).
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Returns true if no sessions are stored.
    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

impl Default for InMemorySessionRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn save(&self, session: &Session) -> Result<(), DomainError> {
        let mut sessions = self.sessions.write().await;
        if sessions.contains_key(session.id()) {
            return Err(DomainError::validation(
                "session_id",
                format!("Session {} already exists", session.id()),
            ));
        }
        sessions.insert(*session.id(), session.clone());
        Ok(())
    }

    async fn update(&self, session: &Session, expected_version: u64) -> Result<(), DomainError> {
        let mut sessions = self.sessions.write().await;
        let stored = sessions.get(session.id()).ok_or_else(|| {
            DomainError::new(
                ErrorCode::SessionNotFound,
                format!("Session {} not found", session.id()),
            )
        })?;

        if stored.version() != expected_version {
            return Err(DomainError::new(
                ErrorCode::VersionConflict,
                format!(
                    "Session {} is at version {}, expected {}",
                    session.id(),
                    stored.version(),
                    expected_version
                ),
            ));
        }

        sessions.insert(*session.id(), session.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &SessionId) -> Result<Option<Session>, DomainError> {
        Ok(self.sessions.read().await.get(id).cloned())
    }

    async fn exists(&self, id: &SessionId) -> Result<bool, DomainError> {
        Ok(self.sessions.read().await.contains_key(id))
    }

    async fn delete(&self, id: &SessionId) -> Result<(), DomainError> {
        let mut sessions = self.sessions.write().await;
        if sessions.remove(id).is_none() {
            return Err(DomainError::new(
                ErrorCode::SessionNotFound,
                format!("Session {} not found", id),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{Role, Timestamp, UserId};

    fn test_session() -> Session {
        Session::new(SessionId::new(), Timestamp::now().plus_secs(3600)).unwrap()
    }

    #[tokio::test]
    async fn save_and_find_round_trip() {
        let repo = InMemorySessionRepository::new();
        let session = test_session();
        repo.save(&session).await.unwrap();

        let found = repo.find_by_id(session.id()).await.unwrap().unwrap();
        assert_eq!(found, session);
    }

    #[tokio::test]
    async fn save_rejects_duplicate_id() {
        let repo = InMemorySessionRepository::new();
        let session = test_session();
        repo.save(&session).await.unwrap();

        let result = repo.save(&session).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn find_unknown_returns_none() {
        let repo = InMemorySessionRepository::new();
        let found = repo.find_by_id(&SessionId::new()).await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn update_with_matching_version_succeeds() {
        let repo = InMemorySessionRepository::new();
        let mut session = test_session();
        repo.save(&session).await.unwrap();

        let expected = session.version();
        session
            .join(UserId::new("user-1").unwrap(), Role::Voter)
            .unwrap();
        repo.update(&session, expected).await.unwrap();

        let found = repo.find_by_id(session.id()).await.unwrap().unwrap();
        assert_eq!(found.members().len(), 1);
    }

    #[tokio::test]
    async fn update_with_stale_version_conflicts() {
        let repo = InMemorySessionRepository::new();
        let session = test_session();
        repo.save(&session).await.unwrap();

        // First writer commits on top of version 0
        let mut first = session.clone();
        first
            .join(UserId::new("user-1").unwrap(), Role::Voter)
            .unwrap();
        repo.update(&first, 0).await.unwrap();

        // Second writer still holds version 0
        let mut second = session.clone();
        second
            .join(UserId::new("user-2").unwrap(), Role::Voter)
            .unwrap();
        let result = repo.update(&second, 0).await;

        match result {
            Err(err) => assert_eq!(err.code, ErrorCode::VersionConflict),
            Ok(()) => panic!("Expected version conflict"),
        }
    }

    #[tokio::test]
    async fn update_unknown_session_fails() {
        let repo = InMemorySessionRepository::new();
        let session = test_session();
        let result = repo.update(&session, 0).await;
        match result {
            Err(err) => assert_eq!(err.code, ErrorCode::SessionNotFound),
            Ok(()) => panic!("Expected not found"),
        }
    }

    #[tokio::test]
    async fn delete_removes_session() {
        let repo = InMemorySessionRepository::new();
        let session = test_session();
        repo.save(&session).await.unwrap();

        repo.delete(session.id()).await.unwrap();
        assert!(!repo.exists(session.id()).await.unwrap());
    }

    #[tokio::test]
    async fn delete_unknown_session_fails() {
        let repo = InMemorySessionRepository::new();
        let result = repo.delete(&SessionId::new()).await;
        assert!(result.is_err());
    }
}
