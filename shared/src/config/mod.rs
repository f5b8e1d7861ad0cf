//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `email` - Notification delivery (mock or SMTP)
//! - `environment` - Environment detection and logging configuration
//! - `otp` - One-time passcode lifetime and resend policy
//! - `server` - HTTP server and CORS configuration
//!
//! Every section is read from environment variables. Values that fail to
//! parse fall back to their defaults; `AppConfig::validate` catches the
//! combinations that cannot work at all.

pub mod email;
pub mod environment;
pub mod otp;
pub mod server;

use serde::Serialize;
use thiserror::Error;

pub use email::{EmailConfig, EmailProvider};
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use otp::OtpConfig;
pub use server::{CorsConfig, ServerConfig};

/// Configuration errors reported at startup
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid configuration value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("Missing required configuration: {0}")]
    Missing(&'static str),
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// OTP lifecycle configuration
    pub otp: OtpConfig,

    /// Email delivery configuration
    pub email: EmailConfig,

    /// CORS configuration
    pub cors: CorsConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            otp: OtpConfig::default(),
            email: EmailConfig::default(),
            cors: CorsConfig::for_environment(env),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    ///
    /// `from_env` delegates here; tests pass a map-backed closure instead of
    /// mutating the process environment.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = Environment::from_lookup(&lookup);
        Self {
            environment,
            server: ServerConfig::from_lookup(&lookup),
            otp: OtpConfig::from_lookup(&lookup),
            email: EmailConfig::from_lookup(&lookup),
            cors: CorsConfig::from_lookup(environment, &lookup),
            logging: LoggingConfig::from_lookup(environment, &lookup),
        }
    }

    /// Check the combinations the server cannot start with
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.otp.validate()?;
        self.email.validate()?;
        Ok(())
    }
}

/// Parse an optional raw value, keeping the default when absent or invalid
pub(crate) fn parse_or<T, F>(lookup: F, key: &str, default: T) -> T
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .and_then(|raw| raw.trim().parse().ok())
        .unwrap_or(default)
}
