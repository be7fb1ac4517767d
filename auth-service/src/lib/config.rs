use std::env;
use std::time::Duration;

use config::builder::DefaultState;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "DatabaseConfig::default_max_connections")]
    pub max_connections: u32,
}

impl DatabaseConfig {
    fn default_max_connections() -> u32 {
        5
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct RedisConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub grpc_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct SessionConfig {
    /// Lifetime of session records in the cache; unset means no expiry.
    pub ttl_seconds: Option<u64>,
}

impl SessionConfig {
    pub fn ttl(&self) -> Option<Duration> {
        self.ttl_seconds.map(Duration::from_secs)
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. `SECRET_KEY` for the signing secret
    /// 2. Environment variables (DATABASE__URL, JWT__SECRET, etc.)
    /// 3. Environment-specific config file (config/{environment}.toml)
    /// 4. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let builder = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(Self::environment())
            .set_override_option("jwt.secret", env::var("SECRET_KEY").ok())?;

        Self::from_builder(builder)
    }

    /// Unprefixed environment source: `DATABASE__URL=postgres://...` overrides
    /// `database.url`.
    fn environment() -> Environment {
        Environment::default().separator("__").try_parsing(true)
    }

    /// Build and validate configuration from an assembled source stack.
    pub fn from_builder(
        builder: config::ConfigBuilder<DefaultState>,
    ) -> Result<Self, ConfigError> {
        let config: Config = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the service cannot safely start with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt.secret.trim().is_empty() {
            return Err(ConfigError::Message(
                "jwt.secret must be set (JWT__SECRET or SECRET_KEY)".to_string(),
            ));
        }

        if self.session.ttl_seconds == Some(0) {
            return Err(ConfigError::Message(
                "session.ttl_seconds must be positive when set".to_string(),
            ));
        }

        Ok(())
    }
}
