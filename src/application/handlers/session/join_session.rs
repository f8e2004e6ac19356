//! JoinSessionHandler - Command handler for adding a member to a session.

use std::sync::Arc;

use crate::application::handlers::mutate_session;
use crate::domain::foundation::{Role, SerializableDomainEvent, SessionId, UserId};
use crate::domain::session::{Session, SessionError, UserJoined};
use crate::ports::{EventPublisher, SessionRepository};

/// Command to join a session.
#[derive(Debug, Clone)]
pub struct JoinSessionCommand {
    pub session_id: SessionId,
    pub user_id: UserId,
    pub role: Role,
}

/// Result of a successful join.
#[derive(Debug, Clone)]
pub struct JoinSessionResult {
    pub session: Session,
    /// False when the user was already a member and only the role changed.
    pub newly_joined: bool,
}

/// Handler for joining sessions.
pub struct JoinSessionHandler {
    repository: Arc<dyn SessionRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl JoinSessionHandler {
    pub fn new(
        repository: Arc<dyn SessionRepository>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            repository,
            event_publisher,
        }
    }

    pub async fn handle(&self, cmd: JoinSessionCommand) -> Result<JoinSessionResult, SessionError> {
        let user_id = cmd.user_id.clone();
        let role = cmd.role;

        let (session, newly_joined) =
            mutate_session(&self.repository, &cmd.session_id, |session| {
                session.join(user_id.clone(), role)
            })
            .await?;

        let event = UserJoined::new(*session.id(), cmd.user_id.clone(), cmd.role);
        let envelope = event.to_envelope().with_user_id(cmd.user_id.to_string());
        self.event_publisher.publish(envelope).await?;

        tracing::info!(
            session_id = %session.id(),
            user_id = %cmd.user_id,
            role = %cmd.role,
            newly_joined,
            "User joined session"
        );

        Ok(JoinSessionResult {
            session,
            newly_joined,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::events::InMemoryEventBus;
    use crate::adapters::storage::InMemorySessionRepository;
    use crate::domain::foundation::Timestamp;

    async fn seeded() -> (JoinSessionHandler, Arc<InMemoryEventBus>, SessionId) {
        let repo = Arc::new(InMemorySessionRepository::new());
        let bus = Arc::new(InMemoryEventBus::new());
        let session =
            Session::new(SessionId::new(), Timestamp::now().plus_secs(3600)).unwrap();
        let id = *session.id();
        repo.save(&session).await.unwrap();
        (JoinSessionHandler::new(repo, bus.clone()), bus, id)
    }

    fn join_cmd(session_id: SessionId, user: &str, role: Role) -> JoinSessionCommand {
        JoinSessionCommand {
            session_id,
            user_id: UserId::new(user).unwrap(),
            role,
        }
    }

    #[tokio::test]
    async fn join_adds_member_and_publishes() {
        let (handler, bus, id) = seeded().await;

        let result = handler
            .handle(join_cmd(id, "user-1", Role::Voter))
            .await
            .unwrap();

        assert!(result.newly_joined);
        assert_eq!(result.session.members().len(), 1);
        assert!(bus.has_event("user.joined.v1"));
    }

    #[tokio::test]
    async fn rejoin_updates_role() {
        let (handler, _bus, id) = seeded().await;

        handler
            .handle(join_cmd(id, "user-1", Role::Voter))
            .await
            .unwrap();
        let result = handler
            .handle(join_cmd(id, "user-1", Role::Moderator))
            .await
            .unwrap();

        assert!(!result.newly_joined);
        assert_eq!(result.session.members().len(), 1);
        assert_eq!(
            result.session.members()[0].role(),
            Role::Moderator
        );
    }

    #[tokio::test]
    async fn join_unknown_session_is_not_found() {
        let (handler, _bus, _id) = seeded().await;

        let result = handler
            .handle(join_cmd(SessionId::new(), "user-1", Role::Voter))
            .await;

        match result {
            Err(SessionError::NotFound(_)) => {}
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn join_envelope_carries_acting_user() {
        let (handler, bus, id) = seeded().await;

        handler
            .handle(join_cmd(id, "user-1", Role::Voter))
            .await
            .unwrap();

        let events = bus.events_of_type("user.joined.v1");
        assert_eq!(events[0].metadata.user_id.as_deref(), Some("user-1"));
    }
}
