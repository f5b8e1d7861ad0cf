//! Password reset route handlers
//!
//! This module contains the three steps of the reset flow:
//! - Requesting a code by email
//! - Verifying the code
//! - Setting the new password

pub mod reset_password;
pub mod set_new_password;
pub mod verify_otp;

use std::sync::Arc;
use validator::Validate;

use flexify_core::repositories::CredentialRepository;
use flexify_core::services::password_reset::{NotificationSender, PasswordResetService};

use crate::handlers::error::ApiError;

/// Application state that holds shared services
pub struct AppState<N, R>
where
    N: NotificationSender,
    R: CredentialRepository,
{
    pub password_reset_service: Arc<PasswordResetService<N, R>>,
}

impl<N, R> AppState<N, R>
where
    N: NotificationSender,
    R: CredentialRepository,
{
    pub fn new(password_reset_service: Arc<PasswordResetService<N, R>>) -> Self {
        Self {
            password_reset_service,
        }
    }
}

/// Run derive validation on a request body
fn validate_request<T: Validate>(request: &T) -> Result<(), ApiError> {
    request.validate().map_err(|errors| {
        tracing::warn!(errors = %errors, "Request validation failed");
        ApiError::BadRequest("Invalid request data".to_string())
    })
}
