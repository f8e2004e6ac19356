//! PostgreSQL implementation of SessionRepository.
//!
//! Persists each Session aggregate as a JSONB document with a separate
//! version column. The aggregate owns its members, tasks, and
//! estimations, so the document is written and read as a unit; the
//! version column carries the compare-and-swap predicate.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, ErrorCode, SessionId};
use crate::domain::session::Session;
use crate::ports::SessionRepository;

/// PostgreSQL implementation of SessionRepository.
#[derive(Clone)]
pub struct PostgresSessionRepository {
    pool: PgPool,
}

impl PostgresSessionRepository {
    /// Creates a new PostgresSessionRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the backing table if it does not exist.
    pub async fn ensure_schema(&self) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS estimation_sessions (
                id UUID PRIMARY KEY,
                doc JSONB NOT NULL,
                version BIGINT NOT NULL,
                updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to create sessions table: {}", e),
            )
        })?;

        Ok(())
    }

    fn serialize(session: &Session) -> Result<serde_json::Value, DomainError> {
        serde_json::to_value(session).map_err(|e| {
            DomainError::new(
                ErrorCode::InternalError,
                format!("Failed to serialize session {}: {}", session.id(), e),
            )
        })
    }

    fn deserialize(doc: serde_json::Value) -> Result<Session, DomainError> {
        serde_json::from_value(doc).map_err(|e| {
            DomainError::new(
                ErrorCode::InternalError,
                format!("Failed to deserialize session document: {}", e),
            )
        })
    }
}

#[async_trait]
impl SessionRepository for PostgresSessionRepository {
    async fn save(&self, session: &Session) -> Result<(), DomainError> {
        let doc = Self::serialize(session)?;

        let result = sqlx::query(
            r#"
            INSERT INTO estimation_sessions (id, doc, version, updated_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(session.id().as_uuid())
        .bind(doc)
        .bind(session.version() as i64)
        .bind(session.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to insert session: {}", e),
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::validation(
                "session_id",
                format!("Session {} already exists", session.id()),
            ));
        }

        Ok(())
    }

    async fn update(&self, session: &Session, expected_version: u64) -> Result<(), DomainError> {
        let doc = Self::serialize(session)?;

        let result = sqlx::query(
            r#"
            UPDATE estimation_sessions
            SET doc = $3, version = $4, updated_at = $5
            WHERE id = $1 AND version = $2
            "#,
        )
        .bind(session.id().as_uuid())
        .bind(expected_version as i64)
        .bind(doc)
        .bind(session.version() as i64)
        .bind(session.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to update session: {}", e),
            )
        })?;

        if result.rows_affected() == 0 {
            // Distinguish a missing row from a lost CAS race
            if self.exists(session.id()).await? {
                return Err(DomainError::new(
                    ErrorCode::VersionConflict,
                    format!(
                        "Session {} was modified concurrently (expected version {})",
                        session.id(),
                        expected_version
                    ),
                ));
            }
            return Err(DomainError::new(
                ErrorCode::SessionNotFound,
                format!("Session not found: {}", session.id()),
            ));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &SessionId) -> Result<Option<Session>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT doc FROM estimation_sessions WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch session: {}", e),
            )
        })?;

        match row {
            Some(row) => {
                let doc: serde_json::Value = row.try_get("doc").map_err(|e| {
                    DomainError::new(
                        ErrorCode::DatabaseError,
                        format!("Failed to read session document: {}", e),
                    )
                })?;
                Ok(Some(Self::deserialize(doc)?))
            }
            None => Ok(None),
        }
    }

    async fn exists(&self, id: &SessionId) -> Result<bool, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT 1 AS one FROM estimation_sessions WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to check session existence: {}", e),
            )
        })?;

        Ok(row.is_some())
    }

    async fn delete(&self, id: &SessionId) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            DELETE FROM estimation_sessions WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to delete session: {}", e),
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::SessionNotFound,
                format!("Session not found: {}", id),
            ));
        }

        Ok(())
    }
}
