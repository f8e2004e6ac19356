//! Authentication types for the domain layer.
//!
//! These types represent an authenticated user extracted from a validated
//! token. They carry no provider dependencies - any token issuer can
//! populate them via the `TokenVerifier` port.

use super::{Role, UserId};
use thiserror::Error;

/// Authenticated user extracted from a validated token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// The unique user identifier from the token's subject claim.
    pub id: UserId,

    /// Display name if the token carries one.
    pub display_name: Option<String>,

    /// Session role encoded in the token's role claim.
    pub role: Role,
}

impl AuthenticatedUser {
    /// Creates a new authenticated user.
    ///
    /// Typically called by a `TokenVerifier` adapter after successfully
    /// validating a token.
    pub fn new(id: UserId, display_name: Option<String>, role: Role) -> Self {
        Self {
            id,
            display_name,
            role,
        }
    }

    /// Returns the display name, falling back to the user id.
    pub fn display_name_or_id(&self) -> &str {
        self.display_name.as_deref().unwrap_or(self.id.as_str())
    }
}

/// Authentication errors that can occur during token validation.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// The token's expiry has passed.
    #[error("Token expired")]
    TokenExpired,

    /// The token is malformed, has a bad signature, or carries
    /// claims the domain cannot use (e.g., an unknown role).
    #[error("Invalid token")]
    InvalidToken,

    /// The verifier itself failed (key material missing, etc.).
    #[error("Authentication service unavailable: {0}")]
    ServiceUnavailable(String),
}
