//! Email Service Module
//!
//! This module provides email delivery for one-time passcodes. It includes
//! an SMTP implementation and a mock implementation for development.
//!
//! ## Features
//!
//! - **Email Service Trait**: Common interface for all email providers
//! - **Mock Implementation**: Log output for development and tests
//! - **SMTP Support**: Production delivery via `lettre`
//! - **Security**: Recipient masking in logs

use std::sync::Arc;

use flexify_shared::config::{EmailConfig, EmailProvider};

pub mod email_service;
pub mod mock_email;
pub mod notification_adapter;
pub mod smtp_email;
pub mod templates;

// Re-export commonly used types
pub use email_service::EmailService;
pub use mock_email::MockEmailService;
pub use notification_adapter::EmailNotificationSender;
pub use smtp_email::SmtpEmailService;

#[cfg(test)]
mod tests;

/// Create an email service based on configuration
///
/// Returns the SMTP service when configured and constructible, and falls
/// back to the mock service otherwise.
///
/// # Arguments
///
/// * `config` - Email configuration containing provider settings
/// * `expiry_minutes` - Code validity window quoted in the message
///
/// # Returns
///
/// A shared email service implementation
pub fn create_email_service(config: &EmailConfig, expiry_minutes: i64) -> Arc<dyn EmailService> {
    let mock = || {
        Arc::new(
            MockEmailService::new(config.app_name.clone()).with_expiry_minutes(expiry_minutes),
        ) as Arc<dyn EmailService>
    };

    match config.provider {
        EmailProvider::Mock => mock(),
        EmailProvider::Smtp => match SmtpEmailService::new(config) {
            Ok(service) => Arc::new(service.with_expiry_minutes(expiry_minutes)),
            Err(e) => {
                tracing::error!(error = %e, "Failed to initialize SMTP email service");
                tracing::warn!("Falling back to mock email service");
                mock()
            }
        },
    }
}
