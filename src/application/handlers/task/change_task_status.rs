//! ChangeTaskStatusHandler - Command handler for task lifecycle moves.

use std::sync::Arc;

use crate::application::handlers::mutate_session;
use crate::domain::foundation::{SerializableDomainEvent, SessionId, TaskId, TaskStatus};
use crate::domain::session::{Session, SessionError, TaskStatusChanged};
use crate::ports::{EventPublisher, SessionRepository};

/// Command to move a task to a new status.
#[derive(Debug, Clone)]
pub struct ChangeTaskStatusCommand {
    pub session_id: SessionId,
    pub task_id: TaskId,
    pub new_status: TaskStatus,
}

/// Result of a successful status change.
#[derive(Debug, Clone)]
pub struct ChangeTaskStatusResult {
    pub session: Session,
    pub old_status: TaskStatus,
    pub new_status: TaskStatus,
}

/// Handler for task status changes.
pub struct ChangeTaskStatusHandler {
    repository: Arc<dyn SessionRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl ChangeTaskStatusHandler {
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
        cmd: ChangeTaskStatusCommand,
    ) -> Result<ChangeTaskStatusResult, SessionError> {
        let task_id = cmd.task_id;
        let new_status = cmd.new_status;

        let (session, old_status) =
            mutate_session(&self.repository, &cmd.session_id, move |session| {
                session.change_task_status(&task_id, new_status)
            })
            .await?;

        let event = TaskStatusChanged::new(*session.id(), task_id, old_status, new_status);
        self.event_publisher.publish(event.to_envelope()).await?;

        tracing::info!(
            session_id = %session.id(),
            task_id = %task_id,
            old_status = %old_status,
            new_status = %new_status,
            "Task status changed"
        );

        Ok(ChangeTaskStatusResult {
            session,
            old_status,
            new_status,
        })
    }
}
