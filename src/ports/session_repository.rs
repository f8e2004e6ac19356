//! Session repository port (write side).
//!
//! Defines the contract for persisting and retrieving Session aggregates.
//! Implementations handle the actual storage operations.
//!
//! # Concurrency
//!
//! `update` is a compare-and-swap on the aggregate's version: callers
//! pass the version they loaded, and the write fails with
//! `VersionConflict` if another writer committed in between.

use crate::domain::foundation::{DomainError, SessionId};
use crate::domain::session::Session;
use async_trait::async_trait;

/// Repository port for Session aggregate persistence.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Save a new session.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if a session with the same ID already exists
    /// - `DatabaseError` on persistence failure
    async fn save(&self, session: &Session) -> Result<(), DomainError>;

    /// Update an existing session, conditional on the expected version.
    ///
    /// `expected_version` is the version the caller loaded before
    /// mutating; `session.version()` carries the new value.
    ///
    /// # Errors
    ///
    /// - `SessionNotFound` if the session doesn't exist
    /// - `VersionConflict` if the stored version differs from
    ///   `expected_version`
    /// - `DatabaseError` on persistence failure
    async fn update(&self, session: &Session, expected_version: u64) -> Result<(), DomainError>;

    /// Find a session by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &SessionId) -> Result<Option<Session>, DomainError>;

    /// Check if a session exists.
    async fn exists(&self, id: &SessionId) -> Result<bool, DomainError>;

    /// Delete a session (primarily for testing).
    ///
    /// In production, sessions are invalidated rather than deleted.
    ///
    /// # Errors
    ///
    /// - `SessionNotFound` if the session doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn delete(&self, id: &SessionId) -> Result<(), DomainError>;
}
