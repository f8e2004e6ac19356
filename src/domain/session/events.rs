//! Domain events emitted by the session aggregate.
//!
//! Events are created by the application handlers after a mutation has
//! been persisted, then handed to the event bus. Event type strings
//! carry a version suffix so consumers can evolve independently.

use crate::domain::foundation::{
    EstimationId, EventId, Role, SessionId, TaskId, TaskStatus, Timestamp, UserId,
};
use crate::domain_event;
use serde::{Deserialize, Serialize};

/// A new session was created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionCreated {
    pub event_id: EventId,
    pub session_id: SessionId,
    pub expires_at: Timestamp,
    pub occurred_at: Timestamp,
}

impl SessionCreated {
    pub fn new(session_id: SessionId, expires_at: Timestamp) -> Self {
        Self {
            event_id: EventId::new(),
            session_id,
            expires_at,
            occurred_at: Timestamp::now(),
        }
    }
}

domain_event!(
    SessionCreated,
    event_type = "session.created.v1",
    aggregate_id = session_id,
    aggregate_type = "Session",
    occurred_at = occurred_at,
    event_id = event_id
);

/// A session was invalidated and accepts no further mutations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionInvalidated {
    pub event_id: EventId,
    pub session_id: SessionId,
    pub occurred_at: Timestamp,
}

impl SessionInvalidated {
    pub fn new(session_id: SessionId) -> Self {
        Self {
            event_id: EventId::new(),
            session_id,
            occurred_at: Timestamp::now(),
        }
    }
}

domain_event!(
    SessionInvalidated,
    event_type = "session.invalidated.v1",
    aggregate_id = session_id,
    aggregate_type = "Session",
    occurred_at = occurred_at,
    event_id = event_id
);

/// A user joined a session (or rejoined with a new role).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserJoined {
    pub event_id: EventId,
    pub session_id: SessionId,
    pub user_id: UserId,
    pub role: Role,
    pub occurred_at: Timestamp,
}

impl UserJoined {
    pub fn new(session_id: SessionId, user_id: UserId, role: Role) -> Self {
        Self {
            event_id: EventId::new(),
            session_id,
            user_id,
            role,
            occurred_at: Timestamp::now(),
        }
    }
}

domain_event!(
    UserJoined,
    event_type = "user.joined.v1",
    aggregate_id = session_id,
    aggregate_type = "Session",
    occurred_at = occurred_at,
    event_id = event_id
);

/// A user left a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserLeft {
    pub event_id: EventId,
    pub session_id: SessionId,
    pub user_id: UserId,
    pub occurred_at: Timestamp,
}

impl UserLeft {
    pub fn new(session_id: SessionId, user_id: UserId) -> Self {
        Self {
            event_id: EventId::new(),
            session_id,
            user_id,
            occurred_at: Timestamp::now(),
        }
    }
}

domain_event!(
    UserLeft,
    event_type = "user.left.v1",
    aggregate_id = session_id,
    aggregate_type = "Session",
    occurred_at = occurred_at,
    event_id = event_id
);

/// A task was added to a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskCreated {
    pub event_id: EventId,
    pub session_id: SessionId,
    pub task_id: TaskId,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub occurred_at: Timestamp,
}

impl TaskCreated {
    pub fn new(
        session_id: SessionId,
        task_id: TaskId,
        title: String,
        url: Option<String>,
        description: Option<String>,
    ) -> Self {
        Self {
            event_id: EventId::new(),
            session_id,
            task_id,
            title,
            url,
            description,
            occurred_at: Timestamp::now(),
        }
    }
}

domain_event!(
    TaskCreated,
    event_type = "task.created.v1",
    aggregate_id = session_id,
    aggregate_type = "Session",
    occurred_at = occurred_at,
    event_id = event_id
);

/// A task moved to a new lifecycle status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskStatusChanged {
    pub event_id: EventId,
    pub session_id: SessionId,
    pub task_id: TaskId,
    pub old_status: TaskStatus,
    pub new_status: TaskStatus,
    pub occurred_at: Timestamp,
}

impl TaskStatusChanged {
    pub fn new(
        session_id: SessionId,
        task_id: TaskId,
        old_status: TaskStatus,
        new_status: TaskStatus,
    ) -> Self {
        Self {
            event_id: EventId::new(),
            session_id,
            task_id,
            old_status,
            new_status,
            occurred_at: Timestamp::now(),
        }
    }
}

domain_event!(
    TaskStatusChanged,
    event_type = "task.status_changed.v1",
    aggregate_id = session_id,
    aggregate_type = "Session",
    occurred_at = occurred_at,
    event_id = event_id
);

/// A task was removed from a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskDeleted {
    pub event_id: EventId,
    pub session_id: SessionId,
    pub task_id: TaskId,
    pub occurred_at: Timestamp,
}

impl TaskDeleted {
    pub fn new(session_id: SessionId, task_id: TaskId) -> Self {
        Self {
            event_id: EventId::new(),
            session_id,
            task_id,
            occurred_at: Timestamp::now(),
        }
    }
}

domain_event!(
    TaskDeleted,
    event_type = "task.deleted.v1",
    aggregate_id = session_id,
    aggregate_type = "Session",
    occurred_at = occurred_at,
    event_id = event_id
);

/// A member cast (or replaced) a complexity vote.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimationAdded {
    pub event_id: EventId,
    pub session_id: SessionId,
    pub estimation_id: EstimationId,
    pub task_id: TaskId,
    pub voter_id: UserId,
    pub complexity: u32,
    pub occurred_at: Timestamp,
}

impl EstimationAdded {
    pub fn new(
        session_id: SessionId,
        estimation_id: EstimationId,
        task_id: TaskId,
        voter_id: UserId,
        complexity: u32,
    ) -> Self {
        Self {
            event_id: EventId::new(),
            session_id,
            estimation_id,
            task_id,
            voter_id,
            complexity,
            occurred_at: Timestamp::now(),
        }
    }
}

domain_event!(
    EstimationAdded,
    event_type = "estimation.added.v1",
    aggregate_id = session_id,
    aggregate_type = "Session",
    occurred_at = occurred_at,
    event_id = event_id
);
