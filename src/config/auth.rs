//! Authentication configuration

use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Authentication configuration.
///
/// Without a secret the service falls back to the mock verifier,
/// which only makes sense for development and tests.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AuthConfig {
    /// HMAC secret for HS256 token verification
    #[serde(default)]
    pub jwt_secret: Option<String>,
}

impl AuthConfig {
    /// Validate authentication configuration
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        match &self.jwt_secret {
            Some(secret) if secret.len() < 32 => Err(ValidationError::JwtSecretTooShort),
            Some(_) => Ok(()),
            None if *environment == Environment::Production => {
                Err(ValidationError::JwtSecretRequired)
            }
            None => Ok(()),
        }
    }
}
