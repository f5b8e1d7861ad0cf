//! Configuration for the password reset service

use chrono::Duration;
use flexify_shared::config::otp::MAX_EXPIRY_MINUTES;
use flexify_shared::config::OtpConfig;

use crate::domain::entities::otp_record::DEFAULT_EXPIRATION_MINUTES;

/// Shortest accepted password in characters
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Longest accepted password in bytes (bcrypt ignores anything beyond)
pub const MAX_PASSWORD_LENGTH: usize = 72;

/// Configuration for the password reset service
#[derive(Debug, Clone)]
pub struct PasswordResetConfig {
    /// Number of minutes before an issued code expires
    pub code_expiration_minutes: i64,
    /// Seconds the client is told to wait before asking for a resend
    pub resend_cooldown_seconds: i64,
    /// Clear the issued code when delivery fails
    pub clear_on_delivery_failure: bool,
    /// bcrypt work factor for new password hashes
    pub bcrypt_cost: u32,
}

impl Default for PasswordResetConfig {
    fn default() -> Self {
        Self {
            code_expiration_minutes: DEFAULT_EXPIRATION_MINUTES,
            resend_cooldown_seconds: 30,
            clear_on_delivery_failure: false,
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl PasswordResetConfig {
    /// Code validity window, clamped to `1..=MAX_EXPIRY_MINUTES`
    pub fn code_expiration(&self) -> Duration {
        Duration::minutes(self.code_expiration_minutes.clamp(1, MAX_EXPIRY_MINUTES))
    }
}

impl From<&OtpConfig> for PasswordResetConfig {
    fn from(otp: &OtpConfig) -> Self {
        Self {
            code_expiration_minutes: otp.expiry_minutes,
            resend_cooldown_seconds: otp.resend_cooldown_seconds,
            clear_on_delivery_failure: otp.clear_on_delivery_failure,
            ..Default::default()
        }
    }
}
