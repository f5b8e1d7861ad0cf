use serde::{Deserialize, Serialize};
use validator::Validate;

use flexify_core::RequestOtpResult;

/// Missing fields deserialize as empty strings so the service can answer
/// with its own "required" messages instead of a JSON error.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    /// Account email address
    #[serde(default)]
    #[validate(length(max = 254))]
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyOtpRequest {
    #[serde(default)]
    #[validate(length(max = 254))]
    pub email: String,

    /// 6-digit code from the email
    #[serde(default)]
    #[validate(length(max = 32))]
    pub otp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SetNewPasswordRequest {
    #[serde(default)]
    #[validate(length(max = 254))]
    pub email: String,

    #[serde(default)]
    #[validate(length(max = 32))]
    pub otp: String,

    #[serde(rename = "newPassword", default)]
    #[validate(length(max = 1024))]
    pub new_password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestOtpResponse {
    pub resend_after: i64, // seconds until can resend
    pub expires_in: i64,   // seconds until the code expires
}

impl From<&RequestOtpResult> for RequestOtpResponse {
    fn from(result: &RequestOtpResult) -> Self {
        Self {
            resend_after: result.resend_after_seconds,
            expires_in: result.expires_in_seconds,
        }
    }
}
