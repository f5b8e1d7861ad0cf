//! Shared utilities and common types for the Flexify server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - Error codes and the JSON response envelope
//! - Identifier helpers (email normalization, validation, masking)

pub mod config;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, ConfigError, CorsConfig, EmailConfig, Environment, LogFormat, LoggingConfig,
    OtpConfig, ServerConfig,
};
pub use errors::error_codes;
pub use types::{ApiResponse, HealthResponse};
pub use utils::identifier::{is_valid_email, mask_email, normalize_identifier};
