//! Database connection pool management.

use serde::Deserialize;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
use sqlx::PgPool;
use std::str::FromStr;
use std::time::Duration;

/// Deployment environment, controlling TLS strictness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development: TLS opportunistic, server certificate not verified.
    Development,
    /// Production: TLS required with full certificate verification.
    Production,
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,

    #[serde(default = "default_environment")]
    pub environment: Environment,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
}

fn default_environment() -> Environment {
    Environment::Production
}
fn default_max_connections() -> u32 {
    20
}
fn default_min_connections() -> u32 {
    5
}
fn default_connect_timeout() -> u64 {
    10
}
fn default_idle_timeout() -> u64 {
    600
}

/// Creates a PostgreSQL connection pool with the given configuration.
///
/// The environment flag selects between strict certificate verification
/// (production) and opportunistic TLS without verification (development).
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let options = PgConnectOptions::from_str(&config.url)?.ssl_mode(match config.environment {
        Environment::Development => PgSslMode::Prefer,
        Environment::Production => PgSslMode::VerifyFull,
    });

    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .connect_with(options)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_deserializes_lowercase() {
        let env: Environment = serde_json::from_str("\"development\"").unwrap();
        assert_eq!(env, Environment::Development);
        let env: Environment = serde_json::from_str("\"production\"").unwrap();
        assert_eq!(env, Environment::Production);
    }

    #[test]
    fn test_config_defaults() {
        let config: DatabaseConfig =
            serde_json::from_str(r#"{"url":"postgres://localhost/powerline"}"#).unwrap();
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.max_connections, 20);
        assert_eq!(config.min_connections, 5);
    }
}
