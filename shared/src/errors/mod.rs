//! Shared error codes used in API error bodies

/// Common error codes used across the application
pub mod error_codes {
    pub const BAD_REQUEST: &str = "BAD_REQUEST";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const INVALID_OTP: &str = "INVALID_OTP";
    pub const DELIVERY_FAILED: &str = "DELIVERY_FAILED";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
}
