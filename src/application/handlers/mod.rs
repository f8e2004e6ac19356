//! Command handlers.
//!
//! Each handler loads the session aggregate, mutates it through
//! aggregate methods, persists with a version-checked update, and
//! publishes a domain event after the write commits.

pub mod estimation;
pub mod session;
pub mod task;

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, SessionId};
use crate::domain::session::{Session, SessionError};
use crate::ports::SessionRepository;

/// Load-mutate-store cycle with a single internal retry on conflict.
///
/// The closure runs against a freshly loaded aggregate on each attempt,
/// so a retry sees the other writer's changes. A second conflict
/// surfaces as `SessionError::Conflict` for the boundary to map to 409.
pub(crate) async fn mutate_session<T, F>(
    repository: &Arc<dyn SessionRepository>,
    session_id: &SessionId,
    mut mutate: F,
) -> Result<(Session, T), SessionError>
where
    F: FnMut(&mut Session) -> Result<T, DomainError>,
{
    for attempt in 0..2 {
        let mut session = repository
            .find_by_id(session_id)
            .await?
            .ok_or_else(|| SessionError::not_found(*session_id))?;

        let expected_version = session.version();
        let outcome = mutate(&mut session)?;

        match repository.update(&session, expected_version).await {
            Ok(()) => return Ok((session, outcome)),
            Err(err) if err.code == ErrorCode::VersionConflict && attempt == 0 => {
                tracing::debug!(
                    session_id = %session_id,
                    "Version conflict on update, retrying with fresh aggregate"
                );
            }
            Err(err) => return Err(err.into()),
        }
    }

    Err(SessionError::Conflict)
}
