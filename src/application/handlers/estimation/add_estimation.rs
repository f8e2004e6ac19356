//! AddEstimationHandler - Command handler for casting a complexity vote.

use std::sync::Arc;

use crate::application::handlers::mutate_session;
use crate::domain::foundation::{SerializableDomainEvent, SessionId, TaskId, UserId};
use crate::domain::session::{Estimation, EstimationAdded, Session, SessionError};
use crate::ports::{EventPublisher, SessionRepository};

/// Command to cast a vote.
///
/// When `task_id` is omitted the vote targets the task currently open
/// for voting.
#[derive(Debug, Clone)]
pub struct AddEstimationCommand {
    pub session_id: SessionId,
    pub voter_id: UserId,
    pub task_id: Option<TaskId>,
    pub complexity: u32,
}

/// Result of a successful vote.
#[derive(Debug, Clone)]
pub struct AddEstimationResult {
    pub session: Session,
    pub estimation: Estimation,
}

/// Handler for casting votes.
pub struct AddEstimationHandler {
    repository: Arc<dyn SessionRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl AddEstimationHandler {
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
        cmd: AddEstimationCommand,
    ) -> Result<AddEstimationResult, SessionError> {
        let voter_id = cmd.voter_id.clone();
        let task_id = cmd.task_id;
        let complexity = cmd.complexity;

        let (session, estimation) =
            mutate_session(&self.repository, &cmd.session_id, move |session| {
                session.add_estimation(voter_id.clone(), task_id, complexity)
            })
            .await?;

        let event = EstimationAdded::new(
            *session.id(),
            *estimation.id(),
            *estimation.task_id(),
            cmd.voter_id.clone(),
            estimation.complexity(),
        );
        let envelope = event.to_envelope().with_user_id(cmd.voter_id.to_string());
        self.event_publisher.publish(envelope).await?;

        tracing::info!(
            session_id = %session.id(),
            task_id = %estimation.task_id(),
            voter_id = %cmd.voter_id,
            complexity = estimation.complexity(),
            "Estimation recorded"
        );

        Ok(AddEstimationResult {
            session,
            estimation,
        })
    }
}
