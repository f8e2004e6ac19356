//! GetSessionHandler - Read-side query for a session view.
//!
//! Clients re-fetch the session after a push notification rather than
//! trusting broadcast payloads, so this returns the full aggregate.

use std::sync::Arc;

use crate::domain::foundation::SessionId;
use crate::domain::session::{Session, SessionError};
use crate::ports::SessionRepository;

/// Query for a single session.
#[derive(Debug, Clone)]
pub struct GetSessionQuery {
    pub session_id: SessionId,
}

/// Handler for fetching sessions.
pub struct GetSessionHandler {
    repository: Arc<dyn SessionRepository>,
}

impl GetSessionHandler {
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self { repository }
    }

    /// Fetch the session. Invalidated and expired sessions are still
    /// readable; the returned status tells clients why mutations fail.
    pub async fn handle(&self, query: GetSessionQuery) -> Result<Session, SessionError> {
        self.repository
            .find_by_id(&query.session_id)
            .await?
            .ok_or_else(|| SessionError::not_found(query.session_id))
    }
}
