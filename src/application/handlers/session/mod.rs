//! Session lifecycle handlers.

mod create_session;
mod get_session;
mod invalidate_session;
mod join_session;
mod leave_session;

pub use create_session::{CreateSessionCommand, CreateSessionHandler, CreateSessionResult};
pub use get_session::{GetSessionHandler, GetSessionQuery};
pub use invalidate_session::{
    InvalidateSessionCommand, InvalidateSessionHandler, InvalidateSessionResult,
};
pub use join_session::{JoinSessionCommand, JoinSessionHandler, JoinSessionResult};
pub use leave_session::{LeaveSessionCommand, LeaveSessionHandler, LeaveSessionResult};
