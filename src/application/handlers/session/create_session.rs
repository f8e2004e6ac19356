//! CreateSessionHandler - Command handler for creating new sessions.

use std::sync::Arc;

use crate::domain::foundation::{SerializableDomainEvent, SessionId, Timestamp};
use crate::domain::session::{Session, SessionCreated, SessionError};
use crate::ports::{EventPublisher, SessionRepository};

/// Command to create a new session.
#[derive(Debug, Clone)]
pub struct CreateSessionCommand {
    pub expires_at: Timestamp,
}

/// Result of successful session creation.
#[derive(Debug, Clone)]
pub struct CreateSessionResult {
    pub session: Session,
    pub event: SessionCreated,
}

/// Handler for creating sessions.
pub struct CreateSessionHandler {
    repository: Arc<dyn SessionRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl CreateSessionHandler {
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
        cmd: CreateSessionCommand,
    ) -> Result<CreateSessionResult, SessionError> {
        let session_id = SessionId::new();
        let session = Session::new(session_id, cmd.expires_at)?;

        self.repository.save(&session).await?;

        let event = SessionCreated::new(*session.id(), *session.expires_at());
        self.event_publisher.publish(event.to_envelope()).await?;

        tracing::info!(session_id = %session.id(), "Session created");

        Ok(CreateSessionResult { session, event })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::events::InMemoryEventBus;
    use crate::adapters::storage::InMemorySessionRepository;

    fn handler_with_deps() -> (
        CreateSessionHandler,
        Arc<InMemorySessionRepository>,
        Arc<InMemoryEventBus>,
    ) {
        let repo = Arc::new(InMemorySessionRepository::new());
        let bus = Arc::new(InMemoryEventBus::new());
        let handler = CreateSessionHandler::new(repo.clone(), bus.clone());
        (handler, repo, bus)
    }

    #[tokio::test]
    async fn creates_and_persists_session() {
        let (handler, repo, _bus) = handler_with_deps();

        let result = handler
            .handle(CreateSessionCommand {
                expires_at: Timestamp::now().plus_secs(3600),
            })
            .await
            .unwrap();

        let stored = repo.find_by_id(result.session.id()).await.unwrap();
        assert!(stored.is_some());
    }

    #[tokio::test]
    async fn publishes_session_created_event() {
        let (handler, _repo, bus) = handler_with_deps();

        handler
            .handle(CreateSessionCommand {
                expires_at: Timestamp::now().plus_secs(3600),
            })
            .await
            .unwrap();

        assert!(bus.has_event("session.created.v1"));
        assert_eq!(bus.event_count(), 1);
    }

    #[tokio::test]
    async fn rejects_past_expiry_without_persisting() {
        let (handler, repo, bus) = handler_with_deps();

        let result = handler
            .handle(CreateSessionCommand {
                expires_at: Timestamp::now().minus_secs(60),
            })
            .await;

        assert!(result.is_err());
        assert!(repo.is_empty().await);
        assert_eq!(bus.event_count(), 0);
    }
}
