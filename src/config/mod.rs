//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using
//! the `config` and `dotenvy` crates. Values are read with the
//! `ESTIMATION_HUB` prefix and nested keys use double underscores:
//!
//! - `ESTIMATION_HUB__SERVER__PORT=5000` -> `server.port`
//! - `ESTIMATION_HUB__DATABASE__URL=postgres://...` -> `database.url`

mod auth;
mod channel;
mod database;
mod error;
mod server;

pub use auth::AuthConfig;
pub use channel::ChannelConfig;
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration.
///
/// Every section has workable development defaults; a configuration
/// with no environment variables at all runs in-memory with the mock
/// token verifier.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration (PostgreSQL, optional)
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Authentication configuration (JWT secret, optional)
    #[serde(default)]
    pub auth: AuthConfig,

    /// WebSocket fan-out configuration
    #[serde(default)]
    pub channel: ChannelConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Loads `.env` if present, then reads `ESTIMATION_HUB`-prefixed
    /// variables with `__` separating nested keys.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("ESTIMATION_HUB")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate(&self.server.environment)?;
        self.channel.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
