use std::env;

use auth::Argon2Hasher;
use auth::BcryptHasher;
use auth::CredentialHasher;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub password: PasswordConfig,
}

/// PostgreSQL configuration. Without a URL the service keeps its
/// directory in memory.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct DatabaseConfig {
    pub url: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

/// Token signing configuration. The token lifetime is fixed and not
/// part of the configuration.
#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("issuer", &self.issuer)
            .finish()
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct PasswordConfig {
    #[serde(default)]
    pub algorithm: PasswordAlgorithm,
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PasswordAlgorithm {
    #[default]
    Argon2,
    Bcrypt,
}

impl PasswordAlgorithm {
    /// Build the credential hasher for this algorithm.
    pub fn hasher(self) -> Box<dyn CredentialHasher> {
        match self {
            PasswordAlgorithm::Argon2 => Box::new(Argon2Hasher::new()),
            PasswordAlgorithm::Bcrypt => Box::new(BcryptHasher::new()),
        }
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (JWT__SECRET, DATABASE__URL, SERVER__HTTP_PORT, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::default().separator("__"))
            .build()?;

        configuration.try_deserialize()
    }
}
