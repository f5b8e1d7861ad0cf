//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the Flexify server.
//! It provides the concrete notification senders used by the password
//! reset service.
//!
//! ## Architecture
//!
//! - **Email**: SMTP delivery through `lettre`, plus a mock sender for
//!   development and tests
//! - **Adapters**: bridges from the email services to the core
//!   `NotificationSender` trait

/// Email service module - SMTP and mock providers
pub mod email;

pub use email::{
    create_email_service, EmailNotificationSender, EmailService, MockEmailService,
    SmtpEmailService,
};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Email service error
    #[error("Email service error: {0}")]
    Email(String),

    /// General infrastructure error
    #[error("Infrastructure error: {0}")]
    General(String),
}
