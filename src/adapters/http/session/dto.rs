//! HTTP DTOs for session endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing
//! independent evolution.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Role, SessionStatus, TaskId, TaskStatus, Timestamp};
use crate::domain::session::{Estimation, Member, Session, Task};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to create a new session.
///
/// `expires_at` is optional; the server applies its default TTL when
/// omitted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequest {
    #[serde(default)]
    pub expires_at: Option<Timestamp>,
}

/// Request to join a session. The user identity comes from the token.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinSessionRequest {
    pub role: Role,
}

/// Request to add a task.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddTaskRequest {
    pub title: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Request to move a task to a new status.
///
/// Carries the target status rather than an action name, matching what
/// the web client sends.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeTaskStatusRequest {
    pub id: TaskId,
    pub status: TaskStatus,
}

/// Request to cast a vote.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddEstimationRequest {
    pub vote_by: String,
    #[serde(default)]
    pub task_id: Option<TaskId>,
    pub complexity: u32,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Full session view for API responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub id: String,
    pub status: SessionStatus,
    pub expires_at: String,
    pub members: Vec<MemberResponse>,
    pub tasks: Vec<TaskResponse>,
    pub estimations: Vec<EstimationResponse>,
    pub version: u64,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Session> for SessionResponse {
    fn from(session: &Session) -> Self {
        Self {
            id: session.id().to_string(),
            status: session.status(),
            expires_at: session.expires_at().to_rfc3339(),
            members: session.members().iter().map(Into::into).collect(),
            tasks: session.tasks().iter().map(Into::into).collect(),
            estimations: session.estimations().iter().map(Into::into).collect(),
            version: session.version(),
            created_at: session.created_at().to_rfc3339(),
            updated_at: session.updated_at().to_rfc3339(),
        }
    }
}

/// A session member.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberResponse {
    pub user_id: String,
    pub role: Role,
    pub joined_at: String,
}

impl From<&Member> for MemberResponse {
    fn from(member: &Member) -> Self {
        Self {
            user_id: member.user_id().to_string(),
            role: member.role(),
            joined_at: member.joined_at().to_rfc3339(),
        }
    }
}

/// A task in a session.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: TaskStatus,
}

impl From<&Task> for TaskResponse {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id().to_string(),
            title: task.title().to_string(),
            url: task.url().map(str::to_string),
            description: task.description().map(str::to_string),
            status: task.status(),
        }
    }
}

/// A vote on a task.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimationResponse {
    pub id: String,
    pub task_id: String,
    pub vote_by: String,
    pub complexity: u32,
    pub cast_at: String,
}

impl From<&Estimation> for EstimationResponse {
    fn from(estimation: &Estimation) -> Self {
        Self {
            id: estimation.id().to_string(),
            task_id: estimation.task_id().to_string(),
            vote_by: estimation.voter_id().to_string(),
            complexity: estimation.complexity(),
            cast_at: estimation.cast_at().to_rfc3339(),
        }
    }
}

/// Structured error body: `{code, message}`, nothing internal.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_FAILED", message)
    }
}
