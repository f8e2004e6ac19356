//! TokenVerifier port - Interface for validating bearer tokens.
//!
//! The HTTP and WebSocket layers hand raw tokens to this port and get
//! back an `AuthenticatedUser`. The domain never sees token formats.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};

/// Port for validating bearer tokens.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    /// Validate a raw bearer token and extract the authenticated user.
    ///
    /// # Errors
    ///
    /// - `TokenExpired` if the token's expiry has passed
    /// - `InvalidToken` if the token is malformed or carries claims
    ///   the domain cannot use
    /// - `ServiceUnavailable` if the verifier itself failed
    async fn verify(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}
