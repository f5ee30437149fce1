use persistence::db::DatabaseConfig;
use serde::Deserialize;
use std::net::SocketAddr;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub security: SecurityConfig,
    pub admin: AdminConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SecurityConfig {
    /// Allowed CORS origins; empty means any origin (development).
    #[serde(default)]
    pub cors_origins: Vec<String>,

    /// Per-client rate limit on the auth endpoints; 0 disables limiting.
    #[serde(default = "default_auth_rate_limit")]
    pub auth_rate_limit_per_minute: u32,
}

/// Admin credential provisioning settings.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminConfig {
    /// Passcode hashed and stored on first startup, when no credential row
    /// exists yet. Ignored afterwards; rotate via the change-password flow.
    pub initial_passcode: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_request_timeout() -> u64 {
    30
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "json".to_string()
}
fn default_auth_rate_limit() -> u32 {
    30
}

impl Config {
    /// Loads configuration from `config/default.toml`, an optional
    /// `config/local.toml`, and `PL__`-prefixed environment variables.
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("PL").separator("__"))
            .build()?;

        let cfg: Self = config.try_deserialize()?;
        cfg.check()?;
        Ok(cfg)
    }

    /// Rejects configurations that cannot possibly serve.
    fn check(&self) -> Result<(), config::ConfigError> {
        if self.database.url.is_empty() {
            return Err(config::ConfigError::Message(
                "database.url must be set".to_string(),
            ));
        }
        if self.admin.initial_passcode.is_empty() {
            return Err(config::ConfigError::Message(
                "admin.initial_passcode must be set".to_string(),
            ));
        }
        Ok(())
    }

    pub fn socket_addr(&self) -> SocketAddr {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .unwrap_or_else(|_| SocketAddr::from(([0, 0, 0, 0], self.server.port)))
    }
}
