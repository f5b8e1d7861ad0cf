//! Types for password reset results

use chrono::{DateTime, Utc};

/// Result of requesting a code
#[derive(Debug, Clone)]
pub struct RequestOtpResult {
    /// Normalized identifier the code was issued for
    pub identifier: String,
    /// When the issued code stops being accepted
    pub expires_at: DateTime<Utc>,
    /// Seconds until expiry, at issuance
    pub expires_in_seconds: i64,
    /// Seconds the client should wait before asking for a resend
    pub resend_after_seconds: i64,
    /// Message ID reported by the notification sender
    pub delivery_id: String,
}
