//! DeleteTaskHandler - Command handler for removing a task.
//!
//! Deletion is permitted from any task status; it is a removal, not a
//! lifecycle transition. Votes on the task go with it.

use std::sync::Arc;

use crate::application::handlers::mutate_session;
use crate::domain::foundation::{SerializableDomainEvent, SessionId, TaskId};
use crate::domain::session::{Session, SessionError, TaskDeleted};
use crate::ports::{EventPublisher, SessionRepository};

/// Command to delete a task.
#[derive(Debug, Clone)]
pub struct DeleteTaskCommand {
    pub session_id: SessionId,
    pub task_id: TaskId,
}

/// Result of a successful deletion.
#[derive(Debug, Clone)]
pub struct DeleteTaskResult {
    pub session: Session,
}

/// Handler for deleting tasks.
pub struct DeleteTaskHandler {
    repository: Arc<dyn SessionRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl DeleteTaskHandler {
    pub fn new(
        repository: Arc<dyn SessionRepository>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            repository,
            event_publisher,
        }
    }

    pub async fn handle(&self, cmd: DeleteTaskCommand) -> Result<DeleteTaskResult, SessionError> {
        let task_id = cmd.task_id;

        let (session, _task) =
            mutate_session(&self.repository, &cmd.session_id, move |session| {
                session.remove_task(&task_id)
            })
            .await?;

        let event = TaskDeleted::new(*session.id(), task_id);
        self.event_publisher.publish(event.to_envelope()).await?;

        tracing::info!(
            session_id = %session.id(),
            task_id = %task_id,
            "Task deleted"
        );

        Ok(DeleteTaskResult { session })
    }
}
