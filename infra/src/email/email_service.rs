//! Email Service Interface
//!
//! Defines the trait for email service implementations that deliver
//! one-time passcodes.

use async_trait::async_trait;

use crate::InfrastructureError;

use super::templates;

/// Email service trait for sending HTML messages
///
/// Implementations include:
/// - SMTP relay via `lettre`
/// - Mock implementation for development
#[async_trait]
pub trait EmailService: Send + Sync {
    /// Send an HTML email
    ///
    /// # Arguments
    ///
    /// * `to` - The recipient's email address
    /// * `subject` - Subject line
    /// * `html_body` - HTML message body
    ///
    /// # Returns
    ///
    /// * `Ok(message_id)` - Unique identifier for the sent message
    /// * `Err(InfrastructureError)` - If sending fails
    async fn send_email(
        &self,
        to: &str,
        subject: &str,
        html_body: &str,
    ) -> Result<String, InfrastructureError>;

    /// Send a password reset code
    ///
    /// Renders the standard OTP template and sends it.
    async fn send_otp_email(&self, to: &str, code: &str) -> Result<String, InfrastructureError> {
        let subject = templates::otp_email_subject(self.app_name());
        let body = templates::otp_email_html(self.app_name(), code, self.expiry_minutes());
        self.send_email(to, &subject, &body).await
    }

    /// Product name used in subjects and templates
    fn app_name(&self) -> &str;

    /// Validity window quoted in the OTP template
    fn expiry_minutes(&self) -> i64 {
        templates::DEFAULT_EXPIRY_MINUTES
    }

    /// Get the service provider name ("SMTP", "Mock")
    fn provider_name(&self) -> &str;

    /// Check if the service is available
    ///
    /// Default implementation always returns true.
    async fn is_available(&self) -> bool {
        true
    }
}
