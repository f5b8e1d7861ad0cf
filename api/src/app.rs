//! Application factory
//!
//! Builds the Actix-web application around shared state. `main` and the
//! integration tests use the same factory.

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App, HttpResponse};
use tracing_actix_web::TracingLogger;

use flexify_core::repositories::CredentialRepository;
use flexify_core::services::password_reset::NotificationSender;
use flexify_shared::{CorsConfig, HealthResponse};

use crate::handlers::error::{json_error_handler, not_found};
use crate::middleware::cors::create_cors;
use crate::routes::password_reset::{
    reset_password::reset_password, set_new_password::set_new_password, verify_otp::verify_otp,
    AppState,
};

/// Create and configure the application with all dependencies
pub fn create_app<N, R>(
    app_state: web::Data<AppState<N, R>>,
    cors_config: &CorsConfig,
    max_payload_size: usize,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody + 'static>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    N: NotificationSender + 'static,
    R: CredentialRepository + 'static,
{
    let json_config = web::JsonConfig::default()
        .limit(max_payload_size)
        .error_handler(json_error_handler);

    App::new()
        .app_data(app_state)
        .app_data(json_config)
        // TracingLogger wraps last, so it is the outermost layer
        .wrap(create_cors(cors_config))
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api")
                .route("/reset-password", web::post().to(reset_password::<N, R>))
                .route("/verify-otp", web::post().to(verify_otp::<N, R>))
                .route("/set-new-password", web::post().to(set_new_password::<N, R>)),
        )
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse::healthy(
        "flexify-api",
        env!("CARGO_PKG_VERSION"),
    ))
}
