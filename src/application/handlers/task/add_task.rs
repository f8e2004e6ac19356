//! AddTaskHandler - Command handler for adding a task to a session.

use std::sync::Arc;

use crate::application::handlers::mutate_session;
use crate::domain::foundation::{SerializableDomainEvent, SessionId, TaskId};
use crate::domain::session::{Session, SessionError, Task, TaskCreated};
use crate::ports::{EventPublisher, SessionRepository};

/// Command to add a task.
#[derive(Debug, Clone)]
pub struct AddTaskCommand {
    pub session_id: SessionId,
    pub title: String,
    pub url: Option<String>,
    pub description: Option<String>,
}

/// Result of a successful task creation.
#[derive(Debug, Clone)]
pub struct AddTaskResult {
    pub session: Session,
    pub task_id: TaskId,
    pub event: TaskCreated,
}

/// Handler for adding tasks.
pub struct AddTaskHandler {
    repository: Arc<dyn SessionRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl AddTaskHandler {
    pub fn new(
        repository: Arc<dyn SessionRepository>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            repository,
            event_publisher,
        }
    }

    pub async fn handle(&self, cmd: AddTaskCommand) -> Result<AddTaskResult, SessionError> {
        let task_id = TaskId::new();
        let title = cmd.title.clone();
        let url = cmd.url.clone();
        let description = cmd.description.clone();

        let (session, ()) = mutate_session(&self.repository, &cmd.session_id, move |session| {
            let task = Task::new(task_id, title.clone(), url.clone(), description.clone())?;
            session.add_task(task)
        })
        .await?;

        // Publish only after the write commits: exactly one broadcast
        // per successfully created task.
        let event = TaskCreated::new(
            *session.id(),
            task_id,
            cmd.title,
            cmd.url,
            cmd.description,
        );
        self.event_publisher.publish(event.to_envelope()).await?;

        tracing::info!(
            session_id = %session.id(),
            task_id = %task_id,
            "Task added to session"
        );

        Ok(AddTaskResult {
            session,
            task_id,
            event,
        })
    }
}
