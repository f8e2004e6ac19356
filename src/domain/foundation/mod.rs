//! Foundation types shared across the domain layer.
//!
//! Value objects, error taxonomy, and the domain event infrastructure
//! that every aggregate builds on. Nothing in here depends on any
//! particular aggregate or adapter.

pub mod auth;
pub mod errors;
pub mod events;
pub mod ids;
pub mod role;
pub mod session_status;
pub mod task_status;
pub mod timestamp;

pub use auth::{AuthError, AuthenticatedUser};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use events::{
    DomainEvent, EventEnvelope, EventId, EventMetadata, SerializableDomainEvent,
};
pub use ids::{EstimationId, SessionId, TaskId, UserId};
pub use role::Role;
pub use session_status::SessionStatus;
pub use task_status::TaskStatus;
pub use timestamp::Timestamp;
