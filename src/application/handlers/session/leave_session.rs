//! LeaveSessionHandler - Command handler for removing a member.

use std::sync::Arc;

use crate::application::handlers::mutate_session;
use crate::domain::foundation::{SerializableDomainEvent, SessionId, UserId};
use crate::domain::session::{Session, SessionError, UserLeft};
use crate::ports::{EventPublisher, SessionRepository};

/// Command to leave a session.
#[derive(Debug, Clone)]
pub struct LeaveSessionCommand {
    pub session_id: SessionId,
    pub user_id: UserId,
}

/// Result of a successful leave.
#[derive(Debug, Clone)]
pub struct LeaveSessionResult {
    pub session: Session,
}

/// Handler for leaving sessions.
pub struct LeaveSessionHandler {
    repository: Arc<dyn SessionRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl LeaveSessionHandler {
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
        cmd: LeaveSessionCommand,
    ) -> Result<LeaveSessionResult, SessionError> {
        let user_id = cmd.user_id.clone();

        let (session, _member) =
            mutate_session(&self.repository, &cmd.session_id, |session| {
                session.leave(&user_id)
            })
            .await?;

        let event = UserLeft::new(*session.id(), cmd.user_id.clone());
        let envelope = event.to_envelope().with_user_id(cmd.user_id.to_string());
        self.event_publisher.publish(envelope).await?;

        tracing::info!(
            session_id = %session.id(),
            user_id = %cmd.user_id,
            "User left session"
        );

        Ok(LeaveSessionResult { session })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::events::InMemoryEventBus;
    use crate::adapters::storage::InMemorySessionRepository;
    use crate::domain::foundation::{Role, Timestamp};

    async fn seeded_with_member() -> (LeaveSessionHandler, Arc<InMemoryEventBus>, SessionId) {
        let repo = Arc::new(InMemorySessionRepository::new());
        let bus = Arc::new(InMemoryEventBus::new());
        let mut session =
            Session::new(SessionId::new(), Timestamp::now().plus_secs(3600)).unwrap();
        session
            .join(UserId::new("user-1").unwrap(), Role::Voter)
            .unwrap();
        let id = *session.id();
        repo.save(&session).await.unwrap();
        (LeaveSessionHandler::new(repo, bus.clone()), bus, id)
    }

    #[tokio::test]
    async fn leave_removes_member_and_publishes() {
        let (handler, bus, id) = seeded_with_member().await;

        let result = handler
            .handle(LeaveSessionCommand {
                session_id: id,
                user_id: UserId::new("user-1").unwrap(),
            })
            .await
            .unwrap();

        assert!(result.session.members().is_empty());
        assert!(bus.has_event("user.left.v1"));
    }

    #[tokio::test]
    async fn leave_by_non_member_fails() {
        let (handler, bus, id) = seeded_with_member().await;

        let result = handler
            .handle(LeaveSessionCommand {
                session_id: id,
                user_id: UserId::new("ghost").unwrap(),
            })
            .await;

        match result {
            Err(SessionError::MemberNotFound(_)) => {}
            other => panic!("Expected MemberNotFound, got {:?}", other),
        }
        assert!(!bus.has_event("user.left.v1"));
    }
}
