//! Task entity.
//!
//! Tasks are the work items being estimated inside a session. They are
//! owned by the `Session` aggregate and only mutated through it.

use crate::domain::foundation::{DomainError, TaskId, TaskStatus};
use serde::{Deserialize, Serialize};

/// Maximum length for a task title.
pub const MAX_TITLE_LENGTH: usize = 500;

/// A work item under estimation.
///
/// # Invariants
///
/// - `title` is 1-500 characters, non-empty after trimming
/// - status transitions follow `TaskStatus::can_transition_to`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier for this task.
    id: TaskId,

    /// Short description of the work item.
    title: String,

    /// Optional link to an external tracker item.
    url: Option<String>,

    /// Optional longer description.
    description: Option<String>,

    /// Current lifecycle status.
    status: TaskStatus,
}

impl Task {
    /// Create a new open task.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if title is empty or too long
    pub fn new(
        id: TaskId,
        title: String,
        url: Option<String>,
        description: Option<String>,
    ) -> Result<Self, DomainError> {
        Self::validate_title(&title)?;

        Ok(Self {
            id,
            title,
            url,
            description,
            status: TaskStatus::Open,
        })
    }

    /// Reconstitute a task from persistence (no validation).
    pub fn reconstitute(
        id: TaskId,
        title: String,
        url: Option<String>,
        description: Option<String>,
        status: TaskStatus,
    ) -> Self {
        Self {
            id,
            title,
            url,
            description,
            status,
        }
    }

    /// Returns the task ID.
    pub fn id(&self) -> &TaskId {
        &self.id
    }

    /// Returns the task title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the external tracker link, if any.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Returns the description, if any.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the current status.
    pub fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns true if the task currently accepts votes.
    pub fn accepts_votes(&self) -> bool {
        self.status.accepts_votes()
    }

    /// Move the task to a new status.
    ///
    /// Returns the previous status on success.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if the transition is not allowed
    pub fn change_status(&mut self, new_status: TaskStatus) -> Result<TaskStatus, DomainError> {
        if !self.status.can_transition_to(&new_status) {
            return Err(DomainError::new(
                crate::domain::foundation::ErrorCode::InvalidStateTransition,
                format!(
                    "Task cannot move from {} to {}",
                    self.status, new_status
                ),
            ));
        }

        let old_status = self.status;
        self.status = new_status;
        Ok(old_status)
    }

    /// Validates the task title.
    fn validate_title(title: &str) -> Result<(), DomainError> {
        let trimmed = title.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("title", "Title cannot be empty"));
        }
        if trimmed.len() > MAX_TITLE_LENGTH {
            return Err(DomainError::validation(
                "title",
                format!("Title must be {} characters or less", MAX_TITLE_LENGTH),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_task() -> Task {
        Task::new(TaskId::new(), "Implement login".to_string(), None, None).unwrap()
    }

    #[test]
    fn new_task_is_open() {
        let task = test_task();
        assert_eq!(task.status(), TaskStatus::Open);
        assert!(task.accepts_votes());
    }

    #[test]
    fn new_task_rejects_empty_title() {
        let result = Task::new(TaskId::new(), "".to_string(), None, None);
        assert!(result.is_err());
    }

    #[test]
    fn new_task_rejects_whitespace_title() {
        let result = Task::new(TaskId::new(), "   ".to_string(), None, None);
        assert!(result.is_err());
    }

    #[test]
    fn new_task_rejects_too_long_title() {
        let long_title = "x".repeat(MAX_TITLE_LENGTH + 1);
        let result = Task::new(TaskId::new(), long_title, None, None);
        assert!(result.is_err());
    }

    #[test]
    fn change_status_returns_old_status() {
        let mut task = test_task();
        let old = task.change_status(TaskStatus::Evaluated).unwrap();
        assert_eq!(old, TaskStatus::Open);
        assert_eq!(task.status(), TaskStatus::Evaluated);
    }

    #[test]
    fn change_status_rejects_invalid_transition() {
        let mut task = test_task();
        let result = task.change_status(TaskStatus::Ended);
        assert!(result.is_err());
        assert_eq!(task.status(), TaskStatus::Open);
    }

    #[test]
    fn evaluated_task_does_not_accept_votes() {
        let mut task = test_task();
        task.change_status(TaskStatus::Evaluated).unwrap();
        assert!(!task.accepts_votes());
    }

    #[test]
    fn suspended_task_can_reopen() {
        let mut task = test_task();
        task.change_status(TaskStatus::Suspended).unwrap();
        task.change_status(TaskStatus::Open).unwrap();
        assert_eq!(task.status(), TaskStatus::Open);
    }

    #[test]
    fn change_status_walks_every_allowed_edge() {
        let mut task = test_task();
        for target in [
            TaskStatus::Suspended,
            TaskStatus::Open,
            TaskStatus::Evaluated,
            TaskStatus::Ended,
        ] {
            task.change_status(target).unwrap();
            assert_eq!(task.status(), target);
        }
        assert!(task.status().is_terminal());
    }
}
