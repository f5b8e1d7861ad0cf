use actix_web::{web, HttpResponse};

use flexify_core::repositories::CredentialRepository;
use flexify_core::services::password_reset::NotificationSender;
use flexify_shared::{mask_email, ApiResponse};

use crate::dto::SetNewPasswordRequest;
use crate::handlers::error::ApiError;

use super::{validate_request, AppState};

/// Handler for POST /api/set-new-password
///
/// Re-verifies the code, stores the new password and consumes the code.
///
/// # Request Body
///
/// ```json
/// { "email": "user@example.com", "otp": "483920", "newPassword": "..." }
/// ```
pub async fn set_new_password<N, R>(
    state: web::Data<AppState<N, R>>,
    request: web::Json<SetNewPasswordRequest>,
) -> Result<HttpResponse, ApiError>
where
    N: NotificationSender + 'static,
    R: CredentialRepository + 'static,
{
    validate_request(&request.0)?;

    tracing::info!(
        email = %mask_email(request.email.trim()),
        "Processing set_new_password request"
    );

    state
        .password_reset_service
        .reset_password(&request.email, &request.otp, &request.new_password)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::<()>::success(
        "Password has been reset successfully.",
    )))
}
