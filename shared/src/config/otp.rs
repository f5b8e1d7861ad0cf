//! One-time passcode configuration

use serde::{Deserialize, Serialize};

use super::{parse_or, ConfigError};

/// Default validity window of an issued code
pub const DEFAULT_EXPIRY_MINUTES: i64 = 10;

/// Longest accepted validity window (one day)
pub const MAX_EXPIRY_MINUTES: i64 = 24 * 60;

/// Default delay before the client may ask for another code
pub const DEFAULT_RESEND_COOLDOWN_SECONDS: i64 = 30;

/// OTP lifecycle configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct OtpConfig {
    /// Minutes an issued code stays valid
    pub expiry_minutes: i64,

    /// Seconds the client should wait before requesting a resend.
    /// Advisory only: it is reported to callers, never enforced by the store.
    pub resend_cooldown_seconds: i64,

    /// Drop the freshly issued code when delivery fails
    pub clear_on_delivery_failure: bool,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            expiry_minutes: DEFAULT_EXPIRY_MINUTES,
            resend_cooldown_seconds: DEFAULT_RESEND_COOLDOWN_SECONDS,
            clear_on_delivery_failure: false,
        }
    }
}

impl OtpConfig {
    pub(crate) fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            expiry_minutes: parse_or(&lookup, "OTP_EXPIRY_MINUTES", defaults.expiry_minutes),
            resend_cooldown_seconds: parse_or(
                &lookup,
                "OTP_RESEND_COOLDOWN_SECONDS",
                defaults.resend_cooldown_seconds,
            ),
            clear_on_delivery_failure: parse_or(
                &lookup,
                "OTP_CLEAR_ON_DELIVERY_FAILURE",
                defaults.clear_on_delivery_failure,
            ),
        }
    }

    /// Validity window as a chrono duration, clamped to `1..=MAX_EXPIRY_MINUTES`
    pub fn expiry(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.expiry_minutes.clamp(1, MAX_EXPIRY_MINUTES))
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.expiry_minutes <= 0 {
            return Err(ConfigError::InvalidValue {
                field: "OTP_EXPIRY_MINUTES",
                reason: format!("must be positive, got {}", self.expiry_minutes),
            });
        }
        if self.expiry_minutes > MAX_EXPIRY_MINUTES {
            return Err(ConfigError::InvalidValue {
                field: "OTP_EXPIRY_MINUTES",
                reason: format!(
                    "must be at most {} minutes, got {}",
                    MAX_EXPIRY_MINUTES, self.expiry_minutes
                ),
            });
        }
        if self.resend_cooldown_seconds < 0 {
            return Err(ConfigError::InvalidValue {
                field: "OTP_RESEND_COOLDOWN_SECONDS",
                reason: format!("must not be negative, got {}", self.resend_cooldown_seconds),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_window_is_ten_minutes() {
        let config = OtpConfig::default();
        assert_eq!(config.expiry(), chrono::Duration::minutes(10));
        assert!(!config.clear_on_delivery_failure);
    }

    #[test]
    fn test_validate_rejects_zero_expiry() {
        let config = OtpConfig {
            expiry_minutes: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_oversized_expiry() {
        let config = OtpConfig::from_lookup(|key| match key {
            "OTP_EXPIRY_MINUTES" => Some("200000000000".to_string()),
            _ => None,
        });
        assert_eq!(config.expiry_minutes, 200_000_000_000);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field: "OTP_EXPIRY_MINUTES", .. })
        ));
        assert_eq!(config.expiry(), chrono::Duration::minutes(MAX_EXPIRY_MINUTES));

        let one_day = OtpConfig {
            expiry_minutes: MAX_EXPIRY_MINUTES,
            ..Default::default()
        };
        assert!(one_day.validate().is_ok());
    }

    #[test]
    fn test_bool_flag_parsing() {
        let config = OtpConfig::from_lookup(|key| match key {
            "OTP_CLEAR_ON_DELIVERY_FAILURE" => Some("true".to_string()),
            _ => None,
        });
        assert!(config.clear_on_delivery_failure);
    }
}
