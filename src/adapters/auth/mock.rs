//! Mock implementation of the TokenVerifier port for testing.

use async_trait::async_trait;
use std::collections::HashMap;

use crate::domain::foundation::{AuthenticatedUser, AuthError};
use crate::ports::TokenVerifier;

/// TokenVerifier that resolves tokens from a fixed map.
///
/// Unknown tokens are rejected as invalid.
#[derive(Default)]
pub struct MockTokenVerifier {
    users: HashMap<String, AuthenticatedUser>,
    expired_tokens: Vec<String>,
}

impl MockTokenVerifier {
    /// Creates an empty mock that rejects every token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a token that resolves to the given user.
    pub fn with_user(mut self, token: impl Into<String>, user: AuthenticatedUser) -> Self {
        self.users.insert(token.into(), user);
        self
    }

    /// Registers a token that fails with `TokenExpired`.
    pub fn with_expired_token(mut self, token: impl Into<String>) -> Self {
        self.expired_tokens.push(token.into());
        self
    }
}

#[async_trait]
impl TokenVerifier for MockTokenVerifier {
    async fn verify(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        if self.expired_tokens.iter().any(|t| t == token) {
            return Err(AuthError::TokenExpired);
        }
        self.users
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{Role, UserId};

    fn test_user() -> AuthenticatedUser {
        AuthenticatedUser::new(UserId::new("user-123").unwrap(), None, Role::Voter)
    }

    #[tokio::test]
    async fn known_token_resolves() {
        let verifier = MockTokenVerifier::new().with_user("token-1", test_user());
        let user = verifier.verify("token-1").await.unwrap();
        assert_eq!(user.id.as_str(), "user-123");
    }

    #[tokio::test]
    async fn unknown_token_is_invalid() {
        let verifier = MockTokenVerifier::new();
        let err = verifier.verify("nope").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn expired_token_reports_expiry() {
        let verifier = MockTokenVerifier::new().with_expired_token("old-token");
        let err = verifier.verify("old-token").await.unwrap_err();
        assert!(matches!(err, AuthError::TokenExpired));
    }
}
