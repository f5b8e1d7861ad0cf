//! Outstanding one-time passcode for an account identifier.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// Length of the passcode
pub const CODE_LENGTH: usize = 6;

/// Default expiration time for passcodes (10 minutes)
pub const DEFAULT_EXPIRATION_MINUTES: i64 = 10;

/// The single outstanding code tracked for one identifier
///
/// A record absent from the store means "no active code"; consumed,
/// expired and never-issued codes are not distinguished.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OtpRecord {
    /// Normalized account identifier (lowercased email)
    pub identifier: String,

    /// The 6-digit passcode
    #[serde(skip_serializing)]
    pub code: String,

    /// Timestamp when the code was issued
    pub issued_at: DateTime<Utc>,

    /// Timestamp after which the code is no longer accepted
    pub expires_at: DateTime<Utc>,

    /// Store-wide issuance counter value, unique per issuance
    pub generation: u64,
}

impl OtpRecord {
    /// Creates a record valid for `ttl` from `issued_at`
    ///
    /// A window reaching past the representable range ends at the latest
    /// representable instant.
    pub fn new(
        identifier: String,
        code: String,
        issued_at: DateTime<Utc>,
        ttl: Duration,
        generation: u64,
    ) -> Self {
        Self {
            identifier,
            code,
            issued_at,
            expires_at: issued_at
                .checked_add_signed(ttl)
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
            generation,
        }
    }

    /// Whether the code is expired at `now`
    ///
    /// The boundary instant itself is still valid: only `now > expires_at`
    /// counts as expired.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Time left before expiry, zero once expired
    pub fn time_remaining(&self, now: DateTime<Utc>) -> Duration {
        if self.expires_at > now {
            self.expires_at - now
        } else {
            Duration::zero()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_at(issued_at: DateTime<Utc>) -> OtpRecord {
        OtpRecord::new(
            "user@test.com".to_string(),
            "483920".to_string(),
            issued_at,
            Duration::minutes(DEFAULT_EXPIRATION_MINUTES),
            1,
        )
    }

    #[test]
    fn test_expiry_window() {
        let now = Utc::now();
        let record = record_at(now);
        assert_eq!(record.expires_at, now + Duration::minutes(10));
    }

    #[test]
    fn test_oversized_window_saturates() {
        let now = Utc::now();
        let record = OtpRecord::new(
            "user@test.com".to_string(),
            "483920".to_string(),
            now,
            Duration::days(100_000_000),
            1,
        );
        assert_eq!(record.expires_at, DateTime::<Utc>::MAX_UTC);
        assert!(!record.is_expired_at(now));
    }

    #[test]
    fn test_expiry_boundary_is_inclusive() {
        let now = Utc::now();
        let record = record_at(now);

        assert!(!record.is_expired_at(now));
        assert!(!record.is_expired_at(record.expires_at));
        assert!(record.is_expired_at(record.expires_at + Duration::milliseconds(1)));
    }

    #[test]
    fn test_time_remaining() {
        let now = Utc::now();
        let record = record_at(now);

        assert_eq!(record.time_remaining(now), Duration::minutes(10));
        assert_eq!(
            record.time_remaining(now + Duration::minutes(4)),
            Duration::minutes(6)
        );
        assert_eq!(
            record.time_remaining(now + Duration::minutes(11)),
            Duration::zero()
        );
    }

    #[test]
    fn test_code_is_not_serialized() {
        let record = record_at(Utc::now());
        let json = serde_json::to_string(&record).unwrap();
        assert!(!json.contains("483920"));
        assert!(json.contains("user@test.com"));
    }
}
