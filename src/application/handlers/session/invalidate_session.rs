//! InvalidateSessionHandler - Command handler for invalidating sessions.

use std::sync::Arc;

use crate::application::handlers::mutate_session;
use crate::domain::foundation::{SerializableDomainEvent, SessionId};
use crate::domain::session::{Session, SessionError, SessionInvalidated};
use crate::ports::{EventPublisher, SessionRepository};

/// Command to invalidate a session.
#[derive(Debug, Clone)]
pub struct InvalidateSessionCommand {
    pub session_id: SessionId,
}

/// Result of successful invalidation.
#[derive(Debug, Clone)]
pub struct InvalidateSessionResult {
    pub session: Session,
}

/// Handler for invalidating sessions.
pub struct InvalidateSessionHandler {
    repository: Arc<dyn SessionRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl InvalidateSessionHandler {
    pub fn new(
        repository: Arc<dyn SessionRepository>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            repository,
            event_publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: InvalidateSessionCommand,
    ) -> Result<InvalidateSessionResult, SessionError> {
        let (session, ()) =
            mutate_session(&self.repository, &cmd.session_id, |session| {
                session.invalidate()
            })
            .await?;

        let event = SessionInvalidated::new(*session.id());
        self.event_publisher.publish(event.to_envelope()).await?;

        tracing::info!(session_id = %session.id(), "Session invalidated");

        Ok(InvalidateSessionResult { session })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::events::InMemoryEventBus;
    use crate::adapters::storage::InMemorySessionRepository;
    use crate::domain::foundation::{SessionStatus, Timestamp};

    async fn seeded() -> (
        InvalidateSessionHandler,
        Arc<InMemorySessionRepository>,
        Arc<InMemoryEventBus>,
        SessionId,
    ) {
        let repo = Arc::new(InMemorySessionRepository::new());
        let bus = Arc::new(InMemoryEventBus::new());
        let session =
            Session::new(SessionId::new(), Timestamp::now().plus_secs(3600)).unwrap();
        let id = *session.id();
        repo.save(&session).await.unwrap();
        let handler = InvalidateSessionHandler::new(repo.clone(), bus.clone());
        (handler, repo, bus, id)
    }

    #[tokio::test]
    async fn invalidates_and_publishes() {
        let (handler, repo, bus, id) = seeded().await;

        handler
            .handle(InvalidateSessionCommand { session_id: id })
            .await
            .unwrap();

        let stored = repo.find_by_id(&id).await.unwrap().unwrap();
        assert_eq!(stored.status(), SessionStatus::Invalidated);
        assert!(bus.has_event("session.invalidated.v1"));
    }

    #[tokio::test]
    async fn second_invalidation_fails() {
        let (handler, _repo, _bus, id) = seeded().await;

        handler
            .handle(InvalidateSessionCommand { session_id: id })
            .await
            .unwrap();
        let err = handler
            .handle(InvalidateSessionCommand { session_id: id })
            .await
            .unwrap_err();

        assert!(matches!(err, SessionError::NotActive(_)));
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let (handler, _repo, _bus, _id) = seeded().await;

        let result = handler
            .handle(InvalidateSessionCommand {
                session_id: SessionId::new(),
            })
            .await;

        match result {
            Err(SessionError::NotFound(_)) => {}
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }
}
