//! SMTP Email Service Implementation
//!
//! This module delivers email through an SMTP relay using `lettre`.
//! Connections use STARTTLS on the configured submission port.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{error, info, warn};
use uuid::Uuid;

use flexify_shared::config::EmailConfig;
use flexify_shared::mask_email;

use crate::InfrastructureError;

use super::email_service::EmailService;
use super::templates::DEFAULT_EXPIRY_MINUTES;

/// SMTP email service implementation
pub struct SmtpEmailService {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    app_name: String,
    expiry_minutes: i64,
}

impl SmtpEmailService {
    /// Create a new SMTP email service
    ///
    /// Fails if the host, credentials or sender address are missing or malformed.
    pub fn new(config: &EmailConfig) -> Result<Self, InfrastructureError> {
        let host = config
            .smtp_host
            .as_deref()
            .filter(|h| !h.trim().is_empty())
            .ok_or_else(|| InfrastructureError::Config("SMTP_HOST not set".to_string()))?;
        let username = config
            .username
            .clone()
            .ok_or_else(|| InfrastructureError::Config("EMAIL_USER not set".to_string()))?;
        let password = config
            .password
            .clone()
            .ok_or_else(|| InfrastructureError::Config("EMAIL_PASSWORD not set".to_string()))?;

        let from: Mailbox = format!("{} <{}>", config.app_name, config.from_address)
            .parse()
            .map_err(|e| {
                InfrastructureError::Config(format!("Invalid sender address: {}", e))
            })?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
            .map_err(|e| InfrastructureError::Config(format!("Invalid SMTP relay: {}", e)))?
            .port(config.smtp_port)
            .credentials(Credentials::new(username, password))
            .build();

        info!(
            host = host,
            port = config.smtp_port,
            sender = %mask_email(&config.from_address),
            "SMTP email service initialized"
        );

        Ok(Self {
            transport,
            from,
            app_name: config.app_name.clone(),
            expiry_minutes: DEFAULT_EXPIRY_MINUTES,
        })
    }

    /// Set the validity window quoted in OTP emails
    pub fn with_expiry_minutes(mut self, minutes: i64) -> Self {
        self.expiry_minutes = minutes;
        self
    }

    fn build_message(
        &self,
        to: &str,
        subject: &str,
        html_body: &str,
        message_id: &str,
    ) -> Result<Message, InfrastructureError> {
        let recipient: Mailbox = to.parse().map_err(|e| {
            InfrastructureError::Email(format!(
                "Invalid recipient address {}: {}",
                mask_email(to),
                e
            ))
        })?;
        let domain = self.from.email.domain().to_string();

        Message::builder()
            .from(self.from.clone())
            .to(recipient)
            .subject(subject)
            .message_id(Some(format!("<{}@{}>", message_id, domain)))
            .header(ContentType::TEXT_HTML)
            .body(html_body.to_string())
            .map_err(|e| InfrastructureError::General(format!("Failed to build email: {}", e)))
    }
}

#[async_trait]
impl EmailService for SmtpEmailService {
    async fn send_email(
        &self,
        to: &str,
        subject: &str,
        html_body: &str,
    ) -> Result<String, InfrastructureError> {
        let message_id = Uuid::new_v4().to_string();
        let message = self.build_message(to, subject, html_body, &message_id)?;

        match self.transport.send(message).await {
            Ok(response) => {
                info!(
                    target: "email_service",
                    provider = "smtp",
                    recipient = %mask_email(to),
                    message_id = %message_id,
                    smtp_code = %response.code(),
                    "Email sent successfully"
                );
                Ok(message_id)
            }
            Err(e) => {
                error!(
                    target: "email_service",
                    provider = "smtp",
                    recipient = %mask_email(to),
                    error = %e,
                    "Failed to send email"
                );
                Err(InfrastructureError::Email(format!("SMTP delivery failed: {}", e)))
            }
        }
    }

    fn app_name(&self) -> &str {
        &self.app_name
    }

    fn expiry_minutes(&self) -> i64 {
        self.expiry_minutes
    }

    fn provider_name(&self) -> &str {
        "SMTP"
    }

    async fn is_available(&self) -> bool {
        match self.transport.test_connection().await {
            Ok(connected) => connected,
            Err(e) => {
                warn!(error = %e, "SMTP health check failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flexify_shared::config::EmailProvider;

    fn smtp_config() -> EmailConfig {
        EmailConfig {
            provider: EmailProvider::Smtp,
            smtp_host: Some("smtp.example.com".to_string()),
            username: Some("reset@example.com".to_string()),
            password: Some("secret".to_string()),
            from_address: "reset@example.com".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_new_requires_host() {
        let config = EmailConfig {
            smtp_host: None,
            ..smtp_config()
        };
        assert!(matches!(
            SmtpEmailService::new(&config),
            Err(InfrastructureError::Config(_))
        ));
    }

    #[tokio::test]
    async fn test_new_requires_credentials() {
        let config = EmailConfig {
            password: None,
            ..smtp_config()
        };
        assert!(matches!(
            SmtpEmailService::new(&config),
            Err(InfrastructureError::Config(_))
        ));
    }

    #[tokio::test]
    async fn test_build_message_rejects_invalid_recipient() {
        let service = SmtpEmailService::new(&smtp_config()).unwrap();
        let result = service.build_message("not-an-email", "Subject", "<p>Hi</p>", "id-1");
        assert!(matches!(result, Err(InfrastructureError::Email(_))));
    }

    #[tokio::test]
    async fn test_build_message_sets_headers() {
        let service = SmtpEmailService::new(&smtp_config()).unwrap();
        let message = service
            .build_message("user@test.com", "Password Reset OTP - FLEXIFY", "<p>123456</p>", "id-1")
            .unwrap();

        let raw = String::from_utf8(message.formatted()).unwrap();
        assert!(raw.contains("Subject: Password Reset OTP - FLEXIFY"));
        assert!(raw.contains("Message-ID: <id-1@example.com>"));
        assert!(raw.contains("To: user@test.com"));
        assert_eq!(service.provider_name(), "SMTP");
    }
}
