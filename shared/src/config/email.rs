//! Email delivery configuration

use serde::{Deserialize, Serialize};

use super::{parse_or, ConfigError};

/// Email delivery provider
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailProvider {
    /// Log messages instead of sending them
    #[default]
    Mock,
    /// Deliver through an SMTP relay
    Smtp,
}

impl std::str::FromStr for EmailProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mock" => Ok(EmailProvider::Mock),
            "smtp" => Ok(EmailProvider::Smtp),
            other => Err(format!("Unknown email provider: {}", other)),
        }
    }
}

/// Email service configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmailConfig {
    /// Delivery provider
    pub provider: EmailProvider,
    /// SMTP relay host
    pub smtp_host: Option<String>,
    /// SMTP relay port (submission over STARTTLS by default)
    pub smtp_port: u16,
    /// SMTP account name
    pub username: Option<String>,
    /// SMTP account password
    #[serde(skip_serializing, default)]
    pub password: Option<String>,
    /// Sender address placed in the From header
    pub from_address: String,
    /// Product name shown in subjects and templates
    pub app_name: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            provider: EmailProvider::Mock,
            smtp_host: None,
            smtp_port: 587,
            username: None,
            password: None,
            from_address: String::from("noreply@flexify.com"),
            app_name: String::from("FLEXIFY"),
        }
    }
}

impl EmailConfig {
    pub(crate) fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let username = lookup("EMAIL_USER");
        Self {
            provider: parse_or(&lookup, "EMAIL_PROVIDER", defaults.provider),
            smtp_host: lookup("SMTP_HOST"),
            smtp_port: parse_or(&lookup, "SMTP_PORT", defaults.smtp_port),
            password: lookup("EMAIL_PASSWORD"),
            from_address: lookup("EMAIL_FROM")
                .or_else(|| username.clone())
                .unwrap_or(defaults.from_address),
            username,
            app_name: lookup("APP_NAME").unwrap_or(defaults.app_name),
        }
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.provider != EmailProvider::Smtp {
            return Ok(());
        }
        if self.smtp_host.as_deref().map_or(true, |h| h.trim().is_empty()) {
            return Err(ConfigError::Missing("SMTP_HOST"));
        }
        if self.username.is_none() {
            return Err(ConfigError::Missing("EMAIL_USER"));
        }
        if self.password.is_none() {
            return Err(ConfigError::Missing("EMAIL_PASSWORD"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_address_falls_back_to_username() {
        let config = EmailConfig::from_lookup(|key| match key {
            "EMAIL_USER" => Some("reset@flexify.com".to_string()),
            _ => None,
        });
        assert_eq!(config.from_address, "reset@flexify.com");
        assert_eq!(config.provider, EmailProvider::Mock);
    }

    #[test]
    fn test_password_is_not_serialized() {
        let config = EmailConfig {
            password: Some("hunter2".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("hunter2"));
    }

    #[test]
    fn test_smtp_requires_credentials() {
        let config = EmailConfig {
            provider: EmailProvider::Smtp,
            smtp_host: Some("smtp.gmail.com".to_string()),
            username: Some("user@gmail.com".to_string()),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::Missing("EMAIL_PASSWORD")));
    }
}
