//! Email Notification Sender Adapter
//!
//! This module provides an adapter that implements the core
//! `NotificationSender` trait on top of any `EmailService`, bridging the
//! infrastructure implementation with the password reset service.

use async_trait::async_trait;
use std::sync::Arc;

use flexify_core::services::password_reset::NotificationSender;

use super::email_service::EmailService;

/// Adapter that implements the core `NotificationSender` for email
#[derive(Clone)]
pub struct EmailNotificationSender {
    inner: Arc<dyn EmailService>,
}

impl EmailNotificationSender {
    /// Create a new adapter around an email service
    pub fn new(inner: Arc<dyn EmailService>) -> Self {
        Self { inner }
    }

    /// Name of the wrapped provider
    pub fn provider_name(&self) -> &str {
        self.inner.provider_name()
    }
}

#[async_trait]
impl NotificationSender for EmailNotificationSender {
    async fn send_code(&self, identifier: &str, code: &str) -> Result<String, String> {
        self.inner
            .send_otp_email(identifier, code)
            .await
            .map_err(|e| e.to_string())
    }
}
