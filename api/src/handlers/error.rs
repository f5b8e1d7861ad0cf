//! Mapping from domain errors to HTTP responses
//!
//! Every error leaving a route goes through `ApiError`, so status codes and
//! envelope messages are decided in this one place.

use actix_web::{
    error::JsonPayloadError, http::StatusCode, HttpRequest, HttpResponse, ResponseError,
};
use std::fmt;

use flexify_core::errors::{DomainError, OtpError};
use flexify_shared::{error_codes, ApiResponse};

/// Message returned when delivery fails; the provider reason stays in the logs
pub const DELIVERY_FAILED_MESSAGE: &str = "Failed to send OTP. Please try again later.";

/// Route error wrapping a domain error
#[derive(Debug)]
pub enum ApiError {
    /// Request body or parameters rejected before reaching the service
    BadRequest(String),
    /// Error returned by the password reset service
    Domain(DomainError),
}

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        ApiError::Domain(error)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest(message) => write!(f, "{}", message),
            ApiError::Domain(error) => write!(f, "{}", error),
        }
    }
}

impl ApiError {
    fn code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => error_codes::BAD_REQUEST,
            ApiError::Domain(DomainError::Validation { .. }) => error_codes::VALIDATION_ERROR,
            ApiError::Domain(DomainError::Otp(OtpError::DeliveryFailed { .. })) => {
                error_codes::DELIVERY_FAILED
            }
            ApiError::Domain(DomainError::Otp(_)) => error_codes::INVALID_OTP,
            ApiError::Domain(DomainError::Internal { .. }) => error_codes::INTERNAL_ERROR,
        }
    }

    /// Client-facing message
    ///
    /// Server-side failures never echo provider or internal details.
    fn public_message(&self) -> String {
        match self {
            ApiError::BadRequest(message) => message.clone(),
            ApiError::Domain(DomainError::Validation { message }) => message.clone(),
            ApiError::Domain(DomainError::Otp(OtpError::DeliveryFailed { .. })) => {
                DELIVERY_FAILED_MESSAGE.to_string()
            }
            ApiError::Domain(DomainError::Otp(e)) => e.to_string(),
            ApiError::Domain(DomainError::Internal { .. }) => {
                "An internal error occurred".to_string()
            }
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Domain(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
            ApiError::Domain(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, code = self.code(), "Request failed");
        } else {
            tracing::debug!(error = %self, code = self.code(), "Request rejected");
        }

        HttpResponse::build(status)
            .json(ApiResponse::<()>::error(self.code(), self.public_message()))
    }
}

/// Error handler for `web::JsonConfig`: malformed bodies get the standard envelope
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    tracing::debug!(error = %err, "Rejected JSON payload");
    let response = HttpResponse::BadRequest().json(ApiResponse::<()>::error(
        error_codes::BAD_REQUEST,
        "Invalid JSON payload",
    ));
    actix_web::error::InternalError::from_response(err, response).into()
}

/// Default handler for unknown paths
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::<()>::error(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
