use actix_web::{http::StatusCode, test, web};
use gatekeeper_api::{
    AppMetrics, AuthorizeRequest, SecurityManager, config::SecurityConfig, create_base_app,
};

fn app_parts() -> (web::Data<SecurityManager>, web::Data<AppMetrics>) {
    (
        web::Data::new(SecurityManager::new(SecurityConfig::default())),
        web::Data::new(AppMetrics::new().expect("metrics registry should build")),
    )
}

#[actix_web::test]
async fn test_health_endpoint() {
    let (security, metrics) = app_parts();
    let app = test::init_service(create_base_app(security, metrics)).await;

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert!(resp.status().is_success());

    let body = test::read_body(resp).await;
    let body_str = std::str::from_utf8(&body).unwrap();
    assert!(body_str.contains("healthy"));
}

#[actix_web::test]
async fn test_version_endpoint() {
    let (security, metrics) = app_parts();
    let app = test::init_service(create_base_app(security, metrics)).await;

    let req = test::TestRequest::get().uri("/api/version").to_request();
    let resp = test::call_service(&app, req).await;

    assert!(resp.status().is_success());

    // The response carries version, commit, and build_time fields.
    let body = test::read_body(resp).await;
    let body_str = std::str::from_utf8(&body).unwrap();
    assert!(body_str.contains("version"));
    assert!(body_str.contains("commit"));
    assert!(body_str.contains("build_time"));
}

#[actix_web::test]
async fn test_security_headers_are_applied() {
    let (security, metrics) = app_parts();
    let app = test::init_service(create_base_app(security, metrics)).await;

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let resp = test::call_service(&app, req).await;
    let headers = resp.headers();

    assert_eq!(
        headers
            .get("x-content-type-options")
            .and_then(|h| h.to_str().ok()),
        Some("nosniff")
    );
    assert_eq!(
        headers.get("x-frame-options").and_then(|h| h.to_str().ok()),
        Some("DENY")
    );
    assert!(
        headers
            .get("strict-transport-security")
            .and_then(|h| h.to_str().ok())
            .is_some_and(|v| v.contains("max-age")),
        "HSTS header should be present"
    );
    assert!(
        headers.get("content-security-policy").is_some(),
        "CSP header should be present"
    );
    assert!(
        headers.get("referrer-policy").is_some(),
        "Referrer-Policy header should be present"
    );
}

#[actix_web::test]
async fn test_request_id_header_is_attached() {
    let (security, metrics) = app_parts();
    let app = test::init_service(create_base_app(security, metrics)).await;

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert!(
        resp.headers().get("x-request-id").is_some(),
        "Every response should carry a request ID"
    );

    // An incoming ID is honored rather than replaced.
    let req = test::TestRequest::get()
        .uri("/api/health")
        .insert_header(("X-Request-ID", "test-trace-1"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(
        resp.headers()
            .get("x-request-id")
            .and_then(|h| h.to_str().ok()),
        Some("test-trace-1")
    );
}

#[actix_web::test]
async fn test_metrics_endpoint_reports_security_gauges() {
    let (security, metrics) = app_parts();
    let app = test::init_service(create_base_app(security.clone(), metrics)).await;

    security.auth().create_session("user1");
    security.blacklist().add_to_blacklist("10.0.0.9");

    // Drive one denial through the gate so the counter has a sample.
    let req = test::TestRequest::post()
        .uri("/api/authorize")
        .insert_header(("X-Forwarded-For", "10.0.0.9"))
        .set_json(AuthorizeRequest {
            operation: "chat".to_string(),
        })
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::get().uri("/api/metrics").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body = test::read_body(resp).await;
    let body_str = std::str::from_utf8(&body).unwrap();
    assert!(body_str.contains("active_sessions 1"));
    assert!(body_str.contains("blacklist_size 1"));
    assert!(body_str.contains("gate_denials_total"));
}

#[actix_web::test]
async fn test_openapi_spec_is_served() {
    let (security, metrics) = app_parts();
    let app = test::init_service(create_base_app(security, metrics)).await;

    let req = test::TestRequest::get().uri("/api/spec/v2").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body = test::read_body(resp).await;
    let json: serde_json::Value =
        serde_json::from_slice(&body).expect("Spec should be valid JSON");
    assert_eq!(json["info"]["title"], "Gatekeeper API");
}
