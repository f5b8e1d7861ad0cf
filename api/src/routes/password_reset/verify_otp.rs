use actix_web::{web, HttpResponse};

use flexify_core::repositories::CredentialRepository;
use flexify_core::services::password_reset::NotificationSender;
use flexify_shared::{mask_email, ApiResponse};

use crate::dto::VerifyOtpRequest;
use crate::handlers::error::ApiError;

use super::{validate_request, AppState};

/// Handler for POST /api/verify-otp
///
/// Checks the code without consuming it; the same code is needed again to
/// set the new password.
///
/// # Request Body
///
/// ```json
/// { "email": "user@example.com", "otp": "483920" }
/// ```
pub async fn verify_otp<N, R>(
    state: web::Data<AppState<N, R>>,
    request: web::Json<VerifyOtpRequest>,
) -> Result<HttpResponse, ApiError>
where
    N: NotificationSender + 'static,
    R: CredentialRepository + 'static,
{
    validate_request(&request.0)?;

    tracing::info!(
        email = %mask_email(request.email.trim()),
        "Processing verify_otp request"
    );

    state
        .password_reset_service
        .verify_otp(&request.email, &request.otp)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::<()>::success(
        "OTP verified successfully. Proceed to reset password.",
    )))
}
