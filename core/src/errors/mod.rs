//! Domain-specific error types and error handling.

use thiserror::Error;

/// Outcomes of the OTP lifecycle that callers must handle
///
/// `NotFound` covers never-issued, expired and already-cleared codes alike.
/// `NotFound` and `Mismatch` render the same text so that responses never
/// reveal whether an identifier has a pending reset.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OtpError {
    #[error("Invalid or expired OTP")]
    NotFound,

    #[error("Invalid or expired OTP")]
    Mismatch,

    #[error("Failed to deliver OTP: {reason}")]
    DeliveryFailed { reason: String },
}

impl OtpError {
    /// Whether the error means the submitted code was not accepted
    pub fn is_invalid_code(&self) -> bool {
        matches!(self, OtpError::NotFound | OtpError::Mismatch)
    }
}

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error(transparent)]
    Otp(#[from] OtpError),

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    /// Errors caused by the request rather than by the server
    pub fn is_client_error(&self) -> bool {
        match self {
            DomainError::Validation { .. } => true,
            DomainError::Otp(e) => e.is_invalid_code(),
            DomainError::Internal { .. } => false,
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_and_mismatch_render_identically() {
        assert_eq!(OtpError::NotFound.to_string(), OtpError::Mismatch.to_string());
    }

    #[test]
    fn test_client_error_classification() {
        assert!(DomainError::from(OtpError::Mismatch).is_client_error());
        assert!(DomainError::Validation { message: "bad".into() }.is_client_error());
        assert!(!DomainError::from(OtpError::DeliveryFailed { reason: "smtp down".into() })
            .is_client_error());
        assert!(!DomainError::Internal { message: "boom".into() }.is_client_error());
    }
}
