//! JWT implementation of the TokenVerifier port.
//!
//! Validates HS256-signed bearer tokens. Claims carry the user id in
//! `sub`, an optional display name in `name`, and the session role in
//! `role` (matching the roles the web client requests on join).

use async_trait::async_trait;
use jsonwebtoken::{decode, errors::ErrorKind, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AuthenticatedUser, AuthError, Role, UserId};
use crate::ports::TokenVerifier;

/// Claims expected in an estimation-hub token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user id.
    pub sub: String,
    /// Optional display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Session role (Author, Moderator, or Voter).
    pub role: String,
    /// Expiry as a unix timestamp.
    pub exp: i64,
}

/// TokenVerifier backed by HS256 JWT validation.
pub struct JwtTokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtTokenVerifier {
    /// Creates a verifier from a shared secret.
    pub fn new(secret: &str) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        }
    }
}

#[async_trait]
impl TokenVerifier for JwtTokenVerifier {
    async fn verify(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken,
            }
        })?;

        let claims = data.claims;
        let user_id = UserId::new(claims.sub).map_err(|_| AuthError::InvalidToken)?;
        let role: Role = claims.role.parse().map_err(|_| AuthError::InvalidToken)?;

        Ok(AuthenticatedUser::new(user_id, claims.name, role))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    const SECRET: &str = "test-secret";

    fn issue(claims: &Claims, secret: &str) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn valid_claims() -> Claims {
        Claims {
            sub: "user-123".to_string(),
            name: Some("Alice".to_string()),
            role: "Voter".to_string(),
            exp: (chrono::Utc::now() + chrono::Duration::hours(1)).timestamp(),
        }
    }

    #[tokio::test]
    async fn valid_token_yields_authenticated_user() {
        let verifier = JwtTokenVerifier::new(SECRET);
        let token = issue(&valid_claims(), SECRET);

        let user = verifier.verify(&token).await.unwrap();
        assert_eq!(user.id.as_str(), "user-123");
        assert_eq!(user.display_name.as_deref(), Some("Alice"));
        assert_eq!(user.role, Role::Voter);
    }

    #[tokio::test]
    async fn expired_token_is_rejected() {
        let verifier = JwtTokenVerifier::new(SECRET);
        let mut claims = valid_claims();
        claims.exp = (chrono::Utc::now() - chrono::Duration::hours(1)).timestamp();
        let token = issue(&claims, SECRET);

        let err = verifier.verify(&token).await.unwrap_err();
        assert!(matches!(err, AuthError::TokenExpired));
    }

    #[tokio::test]
    async fn wrong_secret_is_rejected() {
        let verifier = JwtTokenVerifier::new(SECRET);
        let token = issue(&valid_claims(), "other-secret");

        let err = verifier.verify(&token).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn unknown_role_is_rejected() {
        let verifier = JwtTokenVerifier::new(SECRET);
        let mut claims = valid_claims();
        claims.role = "Superuser".to_string();
        let token = issue(&claims, SECRET);

        let err = verifier.verify(&token).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn garbage_token_is_rejected() {
        let verifier = JwtTokenVerifier::new(SECRET);
        let err = verifier.verify("not-a-jwt").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken));
    }
}
