//! Mock Email Service Implementation
//!
//! A mock implementation of the email service for development and testing.
//! Messages are logged instead of being sent.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};
use uuid::Uuid;

use flexify_shared::{is_valid_email, mask_email, normalize_identifier};

use crate::InfrastructureError;

use super::email_service::EmailService;
use super::templates::DEFAULT_EXPIRY_MINUTES;

/// Mock email service for development and testing
///
/// This implementation:
/// - Logs messages instead of sending them
/// - Validates recipient addresses
/// - Generates mock message IDs
/// - Remembers the last code sent to each address
#[derive(Clone)]
pub struct MockEmailService {
    app_name: String,
    expiry_minutes: i64,
    /// Counter for tracking number of messages sent
    message_count: Arc<AtomicU64>,
    /// Last code delivered per normalized address
    last_codes: Arc<Mutex<HashMap<String, String>>>,
    /// Whether to simulate failures (for testing)
    simulate_failure: Arc<AtomicBool>,
}

impl MockEmailService {
    /// Create a new mock email service
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            expiry_minutes: DEFAULT_EXPIRY_MINUTES,
            message_count: Arc::new(AtomicU64::new(0)),
            last_codes: Arc::new(Mutex::new(HashMap::new())),
            simulate_failure: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Set the validity window quoted in OTP emails
    pub fn with_expiry_minutes(mut self, minutes: i64) -> Self {
        self.expiry_minutes = minutes;
        self
    }

    /// Get the total number of messages sent
    pub fn get_message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }

    /// Last code sent to an address, if any
    pub fn last_code_for(&self, email: &str) -> Option<String> {
        self.last_codes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(&normalize_identifier(email))
            .cloned()
    }

    /// Enable or disable failure simulation
    ///
    /// Shared across clones, so a service already handed to an adapter can
    /// still be switched.
    pub fn set_simulate_failure(&self, simulate: bool) {
        self.simulate_failure.store(simulate, Ordering::SeqCst);
    }
}

impl Default for MockEmailService {
    fn default() -> Self {
        Self::new("FLEXIFY")
    }
}

#[async_trait]
impl EmailService for MockEmailService {
    async fn send_email(
        &self,
        to: &str,
        subject: &str,
        html_body: &str,
    ) -> Result<String, InfrastructureError> {
        if !is_valid_email(to) {
            return Err(InfrastructureError::Email(format!(
                "Invalid recipient address: {}",
                mask_email(to)
            )));
        }

        if self.simulate_failure.load(Ordering::SeqCst) {
            warn!(
                recipient = %mask_email(to),
                "Mock email service simulating failure"
            );
            return Err(InfrastructureError::Email(
                "Simulated email sending failure".to_string(),
            ));
        }

        let message_id = format!("mock_{}", Uuid::new_v4());
        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;

        info!(
            target: "email_service",
            provider = "mock",
            recipient = %mask_email(to),
            message_id = %message_id,
            message_number = count,
            subject = subject,
            body_length = html_body.len(),
            "Email sent successfully (mock)"
        );

        Ok(message_id)
    }

    async fn send_otp_email(&self, to: &str, code: &str) -> Result<String, InfrastructureError> {
        let subject = super::templates::otp_email_subject(&self.app_name);
        let body = super::templates::otp_email_html(&self.app_name, code, self.expiry_minutes);
        let message_id = self.send_email(to, &subject, &body).await?;

        // Only the mock provider logs codes
        debug!(
            target: "email_service",
            recipient = %mask_email(to),
            code = code,
            "Mock OTP email content"
        );
        self.last_codes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(normalize_identifier(to), code.to_string());

        Ok(message_id)
    }

    fn app_name(&self) -> &str {
        &self.app_name
    }

    fn expiry_minutes(&self) -> i64 {
        self.expiry_minutes
    }

    fn provider_name(&self) -> &str {
        "Mock"
    }

    async fn is_available(&self) -> bool {
        !self.simulate_failure.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_email_send_success() {
        let service = MockEmailService::default();
        let message_id = service
            .send_email("user@test.com", "Hello", "<p>Hi</p>")
            .await
            .unwrap();

        assert!(message_id.starts_with("mock_"));
        assert_eq!(service.get_message_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_email_rejects_invalid_recipient() {
        let service = MockEmailService::default();
        let result = service.send_email("not-an-email", "Hello", "<p>Hi</p>").await;

        assert!(matches!(result, Err(InfrastructureError::Email(_))));
        assert_eq!(service.get_message_count(), 0);
    }

    #[tokio::test]
    async fn test_mock_email_simulated_failure() {
        let service = MockEmailService::default();
        service.set_simulate_failure(true);

        assert!(service.send_otp_email("user@test.com", "123456").await.is_err());
        assert!(!service.is_available().await);
        assert_eq!(service.last_code_for("user@test.com"), None);
    }

    #[tokio::test]
    async fn test_mock_email_remembers_last_code() {
        let service = MockEmailService::default();

        service.send_otp_email("User@Test.com", "111111").await.unwrap();
        service.send_otp_email("user@test.com", "222222").await.unwrap();

        assert_eq!(service.last_code_for("user@test.com"), Some("222222".to_string()));
        assert_eq!(service.get_message_count(), 2);
    }
}
