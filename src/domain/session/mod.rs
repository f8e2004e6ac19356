//! Session domain module.
//!
//! The session aggregate and everything it owns: members, tasks,
//! estimations, the events it emits, and its error type.

pub mod aggregate;
pub mod errors;
pub mod estimation;
pub mod events;
pub mod task;

pub use aggregate::{Member, Session};
pub use errors::SessionError;
pub use estimation::{Estimation, MAX_COMPLEXITY};
pub use events::{
    EstimationAdded, SessionCreated, SessionInvalidated, TaskCreated, TaskDeleted,
    TaskStatusChanged, UserJoined, UserLeft,
};
pub use task::{Task, MAX_TITLE_LENGTH};
