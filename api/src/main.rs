use actix_web::{web, HttpServer};
use anyhow::Context;
use std::sync::Arc;

use flexify_api::app::create_app;
use flexify_api::routes::password_reset::AppState;
use flexify_api::telemetry::init_tracing;
use flexify_core::repositories::InMemoryCredentialRepository;
use flexify_core::services::password_reset::{PasswordResetConfig, PasswordResetService};
use flexify_infra::{create_email_service, EmailNotificationSender};
use flexify_shared::{AppConfig, Environment};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Environment-specific file first; dotenvy never overrides variables already set
    dotenvy::from_filename(Environment::from_env().env_file()).ok();
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    init_tracing(&config.logging)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {}", e))?;
    config.validate().context("invalid configuration")?;

    tracing::info!(
        environment = %config.environment,
        otp_expiry_minutes = config.otp.expiry_minutes,
        "Starting Flexify API Server"
    );

    let email_service = create_email_service(&config.email, config.otp.expiry_minutes);
    tracing::info!(provider = email_service.provider_name(), "Email service ready");

    let sender = Arc::new(EmailNotificationSender::new(email_service));
    let credentials = Arc::new(InMemoryCredentialRepository::new());
    let service = PasswordResetService::new(
        sender,
        credentials,
        PasswordResetConfig::from(&config.otp),
    );
    let app_state = web::Data::new(AppState::new(Arc::new(service)));

    let bind_address = config.server.bind_address();
    tracing::info!(address = %bind_address, "Server will bind");

    let cors_config = config.cors.clone();
    let max_payload_size = config.server.max_payload_size;
    let mut server = HttpServer::new(move || {
        create_app(app_state.clone(), &cors_config, max_payload_size)
    });
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await
        .context("server terminated with an error")?;

    Ok(())
}
