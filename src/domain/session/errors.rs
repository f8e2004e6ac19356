//! Session-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode, SessionId};

/// Session-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Session was not found.
    NotFound(SessionId),
    /// Session is invalidated or expired.
    NotActive(String),
    /// Task was not found in the session.
    TaskNotFound(String),
    /// User is not a member of the session.
    MemberNotFound(String),
    /// A task status transition was not allowed.
    InvalidTransition(String),
    /// No task is open for voting.
    NoOpenTask,
    /// Another writer committed a newer version of the session.
    Conflict,
    /// Missing or invalid credentials.
    Unauthorized,
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// Infrastructure error.
    Infrastructure(String),
}

impl SessionError {
    pub fn not_found(id: SessionId) -> Self {
        SessionError::NotFound(id)
    }
    pub fn not_active(message: impl Into<String>) -> Self {
        SessionError::NotActive(message.into())
    }
    pub fn task_not_found(message: impl Into<String>) -> Self {
        SessionError::TaskNotFound(message.into())
    }
    pub fn member_not_found(message: impl Into<String>) -> Self {
        SessionError::MemberNotFound(message.into())
    }
    pub fn invalid_transition(message: impl Into<String>) -> Self {
        SessionError::InvalidTransition(message.into())
    }
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        SessionError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }
    pub fn infrastructure(message: impl Into<String>) -> Self {
        SessionError::Infrastructure(message.into())
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            SessionError::NotFound(_) => ErrorCode::SessionNotFound,
            SessionError::NotActive(_) => ErrorCode::SessionInvalidated,
            SessionError::TaskNotFound(_) => ErrorCode::TaskNotFound,
            SessionError::MemberNotFound(_) => ErrorCode::MemberNotFound,
            SessionError::InvalidTransition(_) => ErrorCode::InvalidStateTransition,
            SessionError::NoOpenTask => ErrorCode::NoOpenTask,
            SessionError::Conflict => ErrorCode::VersionConflict,
            SessionError::Unauthorized => ErrorCode::Unauthorized,
            SessionError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            SessionError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
    pub fn message(&self) -> String {
        match self {
            SessionError::NotFound(id) => format!("Session not found: {}", id),
            SessionError::NotActive(msg) => msg.clone(),
            SessionError::TaskNotFound(msg) => msg.clone(),
            SessionError::MemberNotFound(msg) => msg.clone(),
            SessionError::InvalidTransition(msg) => msg.clone(),
            SessionError::NoOpenTask => "No task is currently open for voting".to_string(),
            SessionError::Conflict => {
                "Session was modified concurrently, please retry".to_string()
            }
            SessionError::Unauthorized => "Missing or invalid credentials".to_string(),
            SessionError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            SessionError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for SessionError {}

impl From<DomainError> for SessionError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::SessionInvalidated => SessionError::NotActive(err.message),
            ErrorCode::TaskNotFound => SessionError::TaskNotFound(err.message),
            ErrorCode::MemberNotFound => SessionError::MemberNotFound(err.message),
            ErrorCode::InvalidStateTransition => SessionError::InvalidTransition(err.message),
            ErrorCode::NoOpenTask => SessionError::NoOpenTask,
            ErrorCode::VersionConflict => SessionError::Conflict,
            ErrorCode::Unauthorized | ErrorCode::Forbidden => SessionError::Unauthorized,
            ErrorCode::ValidationFailed
            | ErrorCode::EmptyField
            | ErrorCode::OutOfRange
            | ErrorCode::InvalidFormat => SessionError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            _ => SessionError::Infrastructure(err.message),
        }
    }
}
