use actix_web::{web, HttpResponse};

use flexify_core::repositories::CredentialRepository;
use flexify_core::services::password_reset::NotificationSender;
use flexify_shared::{mask_email, ApiResponse};

use crate::dto::{RequestOtpResponse, ResetPasswordRequest};
use crate::handlers::error::ApiError;

use super::{validate_request, AppState};

/// Handler for POST /api/reset-password
///
/// Issues a code for the email and sends it. Requesting again replaces the
/// outstanding code.
///
/// # Request Body
///
/// ```json
/// { "email": "user@example.com" }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "success": true,
///     "message": "OTP has been sent to your email.",
///     "data": { "resend_after": 30, "expires_in": 600 },
///     "timestamp": "2025-08-14T10:00:00Z"
/// }
/// ```
///
/// ## Errors
/// - 400 when the email is missing or malformed
/// - 500 when delivery fails
pub async fn reset_password<N, R>(
    state: web::Data<AppState<N, R>>,
    request: web::Json<ResetPasswordRequest>,
) -> Result<HttpResponse, ApiError>
where
    N: NotificationSender + 'static,
    R: CredentialRepository + 'static,
{
    validate_request(&request.0)?;

    tracing::info!(
        email = %mask_email(request.email.trim()),
        "Processing reset_password request"
    );

    let result = state
        .password_reset_service
        .request_otp(&request.email)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success_with_data(
        "OTP has been sent to your email.",
        RequestOtpResponse::from(&result),
    )))
}
