//! CORS middleware configuration for cross-origin requests.
//!
//! The password reset pages are served from a separate web origin, so the
//! API has to answer preflight requests for its JSON endpoints.

use actix_cors::Cors;
use actix_web::http::{header, Method};

use flexify_shared::CorsConfig;

/// Creates a CORS middleware instance from configuration.
///
/// A `*` entry allows any origin; otherwise only the listed origins are
/// accepted, and an empty list rejects every cross-origin request.
pub fn create_cors(config: &CorsConfig) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::ORIGIN,
            header::HeaderName::from_static("x-requested-with"),
        ])
        .expose_headers(vec![header::HeaderName::from_static("x-request-id")])
        .max_age(config.max_age);

    if config.allows_any_origin() {
        tracing::info!("Configuring CORS to allow any origin");
        return cors.allow_any_origin();
    }
    if config.allowed_origins.is_empty() {
        tracing::warn!("No CORS origins configured, cross-origin requests will be rejected");
    }

    config
        .allowed_origins
        .iter()
        .map(|origin| origin.trim())
        .filter(|origin| !origin.is_empty())
        .fold(cors, |cors, origin| {
            tracing::info!(origin = origin, "Adding allowed origin");
            cors.allowed_origin(origin)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, web, App, HttpResponse};

    async fn ok() -> HttpResponse {
        HttpResponse::Ok().finish()
    }

    fn restricted() -> CorsConfig {
        CorsConfig {
            allowed_origins: vec!["https://app.flexify.com".to_string()],
            ..CorsConfig::development()
        }
    }

    #[actix_web::test]
    async fn test_listed_origin_is_allowed() {
        let app = test::init_service(
            App::new()
                .wrap(create_cors(&restricted()))
                .route("/", web::get().to(ok)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/")
            .insert_header((header::ORIGIN, "https://app.flexify.com"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert!(resp.status().is_success());
        assert_eq!(
            resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "https://app.flexify.com"
        );
    }

    #[actix_web::test]
    async fn test_unlisted_origin_is_rejected() {
        let app = test::init_service(
            App::new()
                .wrap(create_cors(&restricted()))
                .route("/", web::get().to(ok)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/")
            .insert_header((header::ORIGIN, "https://evil.example.com"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert!(resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
    }

    #[actix_web::test]
    async fn test_empty_origin_list_rejects_cross_origin() {
        let config = CorsConfig {
            allowed_origins: vec![],
            ..CorsConfig::development()
        };
        let app = test::init_service(
            App::new()
                .wrap(create_cors(&config))
                .route("/", web::get().to(ok)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/")
            .insert_header((header::ORIGIN, "https://evil.example.com"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert!(resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
    }
}
