use actix_web::{http::StatusCode, test, web};
use serde_json::{json, Value};
use std::sync::Arc;

use flexify_api::app::create_app;
use flexify_api::routes::password_reset::AppState;
use flexify_core::repositories::{CredentialRepository, InMemoryCredentialRepository};
use flexify_core::services::password_reset::{PasswordResetConfig, PasswordResetService};
use flexify_infra::{EmailNotificationSender, MockEmailService};
use flexify_shared::CorsConfig;

type TestState = AppState<EmailNotificationSender, InMemoryCredentialRepository>;

struct TestContext {
    state: web::Data<TestState>,
    mailer: MockEmailService,
    credentials: Arc<InMemoryCredentialRepository>,
}

/// Helper function to create test application state
fn create_test_context() -> TestContext {
    let mailer = MockEmailService::default();
    let sender = Arc::new(EmailNotificationSender::new(Arc::new(mailer.clone())));
    let credentials = Arc::new(InMemoryCredentialRepository::new());
    let config = PasswordResetConfig {
        bcrypt_cost: 4,
        ..Default::default()
    };
    let service = PasswordResetService::new(sender, credentials.clone(), config);

    TestContext {
        state: web::Data::new(AppState::new(Arc::new(service))),
        mailer,
        credentials,
    }
}

macro_rules! init_app {
    ($ctx:expr) => {
        test::init_service(create_app(
            $ctx.state.clone(),
            &CorsConfig::development(),
            64 * 1024,
        ))
        .await
    };
}

fn post(uri: &str, body: Value) -> test::TestRequest {
    test::TestRequest::post().uri(uri).set_json(body)
}

#[actix_web::test]
async fn test_full_reset_flow() {
    let ctx = create_test_context();
    let app = init_app!(ctx);

    let req = post("/api/reset-password", json!({ "email": "User@Test.com" })).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "OTP has been sent to your email.");
    assert_eq!(body["data"]["resend_after"], 30);
    assert_eq!(body["data"]["expires_in"], 600);

    let code = ctx.mailer.last_code_for("user@test.com").unwrap();

    let resp = test::call_service(
        &app,
        post("/api/verify-otp", json!({ "email": "user@test.com", "otp": code })).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "OTP verified successfully. Proceed to reset password.");

    let resp = test::call_service(
        &app,
        post(
            "/api/set-new-password",
            json!({ "email": "user@test.com", "otp": code, "newPassword": "brand-new-secret" }),
        )
        .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Password has been reset successfully.");

    let hash = ctx
        .credentials
        .find_password_hash("user@test.com")
        .await
        .unwrap()
        .unwrap();
    assert!(bcrypt::verify("brand-new-secret", &hash).unwrap());

    // The code was consumed by the reset
    let resp = test::call_service(
        &app,
        post("/api/verify-otp", json!({ "email": "user@test.com", "otp": code })).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Invalid or expired OTP");
}

#[actix_web::test]
async fn test_reset_password_requires_email() {
    let ctx = create_test_context();
    let app = init_app!(ctx);

    let req = post("/api/reset-password", json!({})).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Email is required");
    assert_eq!(ctx.mailer.get_message_count(), 0);
}

#[actix_web::test]
async fn test_reset_password_delivery_failure() {
    let ctx = create_test_context();
    ctx.mailer.set_simulate_failure(true);
    let app = init_app!(ctx);

    let req = post("/api/reset-password", json!({ "email": "user@test.com" })).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Failed to send OTP. Please try again later.");
}

#[actix_web::test]
async fn test_verify_otp_requires_fields() {
    let ctx = create_test_context();
    let app = init_app!(ctx);

    let req = post("/api/verify-otp", json!({ "email": "user@test.com" })).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Email and OTP are required");
}

#[actix_web::test]
async fn test_verify_otp_wrong_code() {
    let ctx = create_test_context();
    let app = init_app!(ctx);

    let req = post("/api/reset-password", json!({ "email": "user@test.com" })).to_request();
    test::call_service(&app, req).await;
    let code = ctx.mailer.last_code_for("user@test.com").unwrap();
    let wrong = if code == "000000" { "111111" } else { "000000" };

    let resp = test::call_service(
        &app,
        post("/api/verify-otp", json!({ "email": "user@test.com", "otp": wrong })).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Invalid or expired OTP");

    // The real code is still accepted
    let resp = test::call_service(
        &app,
        post("/api/verify-otp", json!({ "email": "user@test.com", "otp": code })).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_set_new_password_requires_all_fields() {
    let ctx = create_test_context();
    let app = init_app!(ctx);

    let body = json!({ "email": "user@test.com", "otp": "123456" });
    let req = post("/api/set-new-password", body).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "All fields are required");
}

#[actix_web::test]
async fn test_set_new_password_rejects_short_password() {
    let ctx = create_test_context();
    let app = init_app!(ctx);

    let req = post("/api/reset-password", json!({ "email": "user@test.com" })).to_request();
    test::call_service(&app, req).await;
    let code = ctx.mailer.last_code_for("user@test.com").unwrap();

    let resp = test::call_service(
        &app,
        post(
            "/api/set-new-password",
            json!({ "email": "user@test.com", "otp": code, "newPassword": "short" }),
        )
        .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(ctx.credentials.is_empty().await);
}

#[actix_web::test]
async fn test_malformed_json_gets_envelope() {
    let ctx = create_test_context();
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/reset-password")
        .insert_header(("content-type", "application/json"))
        .set_payload("{ not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "BAD_REQUEST");
}

#[actix_web::test]
async fn test_unknown_path_is_not_found() {
    let ctx = create_test_context();
    let app = init_app!(ctx);

    let req = test::TestRequest::get().uri("/api/unknown").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "NOT_FOUND");
}

#[actix_web::test]
async fn test_health_check() {
    let ctx = create_test_context();
    let app = init_app!(ctx);

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "flexify-api");
}
