//! Configuration module
//!
//! Environment-driven configuration for the API service and the admin CLI,
//! including database, auth, and import-policy settings.

use std::env;
use std::str::FromStr;

use anyhow::Context;

// Defaults
const DEFAULT_SERVER_PORT: u16 = 8080;
const DEFAULT_MAX_CONNECTIONS: u32 = 20;
const DEFAULT_CONNECTION_TIMEOUT_SECS: u64 = 30;
const DEFAULT_JWT_EXPIRY_HOURS: i64 = 24;
const DEFAULT_MAX_UPLOAD_SIZE_BYTES: usize = 10 * 1024 * 1024;
const DEFAULT_AUTH_MAX_FAILURES: u32 = 10;
const DEFAULT_AUTH_FAILURE_WINDOW_SECS: u64 = 900;

/// Application configuration.
///
/// `confirmation_suffix` and `csv_delimiter` are the import-policy knobs:
/// the logistics system flags orders awaiting confirmation with a suffix on
/// the order number, and its exports are `;`-delimited. Both are
/// conventions of the upstream system, so they are injectable rather than
/// hardcoded.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub database_url: String,
    pub cors_origins: Vec<String>,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    pub jwt_secret: String,
    pub jwt_expiry_hours: i64,
    pub environment: String,
    pub max_upload_size_bytes: usize,
    pub confirmation_suffix: char,
    pub csv_delimiter: u8,
    pub auth_max_failures: u32,
    pub auth_failure_window_seconds: u64,
}

fn env_parse<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET must be set")?;

        let cors_origins = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let confirmation_suffix = env::var("CONFIRMATION_SUFFIX")
            .ok()
            .and_then(|v| v.chars().next())
            .unwrap_or('R');

        let csv_delimiter = env::var("CSV_DELIMITER")
            .ok()
            .and_then(|v| v.bytes().next())
            .unwrap_or(b';');

        let config = Config {
            server_port: env_parse("SERVER_PORT", DEFAULT_SERVER_PORT),
            database_url,
            cors_origins,
            db_max_connections: env_parse("DB_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS),
            db_timeout_seconds: env_parse("DB_TIMEOUT_SECONDS", DEFAULT_CONNECTION_TIMEOUT_SECS),
            jwt_secret,
            jwt_expiry_hours: env_parse("JWT_EXPIRY_HOURS", DEFAULT_JWT_EXPIRY_HOURS),
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            max_upload_size_bytes: env_parse("MAX_UPLOAD_SIZE_BYTES", DEFAULT_MAX_UPLOAD_SIZE_BYTES),
            confirmation_suffix,
            csv_delimiter,
            auth_max_failures: env_parse("AUTH_MAX_FAILURES", DEFAULT_AUTH_MAX_FAILURES),
            auth_failure_window_seconds: env_parse(
                "AUTH_FAILURE_WINDOW_SECONDS",
                DEFAULT_AUTH_FAILURE_WINDOW_SECS,
            ),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.jwt_secret.len() < 32 {
            anyhow::bail!("JWT_SECRET must be at least 32 characters long");
        }
        if self.jwt_expiry_hours <= 0 {
            anyhow::bail!("JWT_EXPIRY_HOURS must be positive");
        }
        if self.csv_delimiter == b'"' || self.csv_delimiter == b'\n' {
            anyhow::bail!("CSV_DELIMITER must not be a quote or newline character");
        }
        if self.confirmation_suffix.is_whitespace() {
            anyhow::bail!("CONFIRMATION_SUFFIX must not be whitespace");
        }
        if self.max_upload_size_bytes == 0 {
            anyhow::bail!("MAX_UPLOAD_SIZE_BYTES must be positive");
        }
        Ok(())
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            server_port: 8080,
            database_url: "postgres://localhost/orderdesk".to_string(),
            cors_origins: vec!["*".to_string()],
            db_max_connections: 20,
            db_timeout_seconds: 30,
            jwt_secret: "0123456789abcdef0123456789abcdef".to_string(),
            jwt_expiry_hours: 24,
            environment: "development".to_string(),
            max_upload_size_bytes: DEFAULT_MAX_UPLOAD_SIZE_BYTES,
            confirmation_suffix: 'R',
            csv_delimiter: b';',
            auth_max_failures: 10,
            auth_failure_window_seconds: 900,
        }
    }

    #[test]
    fn test_validate_accepts_defaults() {
        assert!(test_config().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_short_jwt_secret() {
        let mut config = test_config();
        config.jwt_secret = "short".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_quote_delimiter() {
        let mut config = test_config();
        config.csv_delimiter = b'"';
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_is_production() {
        let mut config = test_config();
        assert!(!config.is_production());
        config.environment = "Production".to_string();
        assert!(config.is_production());
        config.environment = "prod".to_string();
        assert!(config.is_production());
    }
}
