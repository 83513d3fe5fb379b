use actix_web::{http::StatusCode, test, web};
use gatekeeper_api::{
    AppMetrics, AuthorizeRequest, AuthorizeResponse, BlacklistAddRequest, BlacklistChangeResponse,
    BlacklistRemoveRequest, CleanupResponse, QuotaResponse, SecurityManager, SecurityStatsResponse,
    config::{OperationLimits, RateLimitConfig, SecurityConfig},
    create_base_app,
};

const CLIENT_IP: &str = "198.51.100.4";

fn small_limits_config() -> SecurityConfig {
    let mut config = SecurityConfig::default();
    config.limits = OperationLimits {
        transcription: RateLimitConfig::new(1, 3600),
        search: RateLimitConfig::new(5, 60),
        chat: RateLimitConfig::new(2, 60),
    };
    config
}

fn app_parts(config: SecurityConfig) -> (web::Data<SecurityManager>, web::Data<AppMetrics>) {
    (
        web::Data::new(SecurityManager::new(config)),
        web::Data::new(AppMetrics::new().expect("metrics registry should build")),
    )
}

#[actix_web::test]
async fn test_authorize_admits_within_quota() {
    let (security, metrics) = app_parts(small_limits_config());
    let app = test::init_service(create_base_app(security, metrics)).await;

    let req = test::TestRequest::post()
        .uri("/api/authorize")
        .insert_header(("X-Forwarded-For", CLIENT_IP))
        .set_json(AuthorizeRequest {
            operation: "chat".to_string(),
        })
        .to_request();
    let body: AuthorizeResponse = test::call_and_read_body_json(&app, req).await;

    assert!(body.allowed, "First chat request should be admitted");
    assert_eq!(body.remaining, Some(1), "One of two chat slots should remain");
}

#[actix_web::test]
async fn test_authorize_denies_over_quota_with_wait_message() {
    let (security, metrics) = app_parts(small_limits_config());
    let app = test::init_service(create_base_app(security, metrics)).await;

    for _ in 0..2 {
        let req = test::TestRequest::post()
            .uri("/api/authorize")
            .insert_header(("X-Forwarded-For", CLIENT_IP))
            .set_json(AuthorizeRequest {
                operation: "chat".to_string(),
            })
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let req = test::TestRequest::post()
        .uri("/api/authorize")
        .insert_header(("X-Forwarded-For", CLIENT_IP))
        .set_json(AuthorizeRequest {
            operation: "chat".to_string(),
        })
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(
        resp.status(),
        StatusCode::TOO_MANY_REQUESTS,
        "Third chat request should be rate limited"
    );

    let body = test::read_body(resp).await;
    let message = std::str::from_utf8(&body).unwrap();
    assert!(
        message.contains("Rate limit exceeded for chat"),
        "Denial should name the operation: {message}"
    );
    assert!(
        message.contains("wait"),
        "Denial should tell the user how long to wait: {message}"
    );
}

#[actix_web::test]
async fn test_operations_and_identifiers_are_isolated() {
    let (security, metrics) = app_parts(small_limits_config());
    let app = test::init_service(create_base_app(security, metrics)).await;

    // Use up the only transcription slot for this client.
    let req = test::TestRequest::post()
        .uri("/api/authorize")
        .insert_header(("X-Forwarded-For", CLIENT_IP))
        .set_json(AuthorizeRequest {
            operation: "transcription".to_string(),
        })
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri("/api/authorize")
        .insert_header(("X-Forwarded-For", CLIENT_IP))
        .set_json(AuthorizeRequest {
            operation: "transcription".to_string(),
        })
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);

    // Search still has quota for the same client.
    let req = test::TestRequest::post()
        .uri("/api/authorize")
        .insert_header(("X-Forwarded-For", CLIENT_IP))
        .set_json(AuthorizeRequest {
            operation: "search".to_string(),
        })
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    // Another client still has transcription quota.
    let req = test::TestRequest::post()
        .uri("/api/authorize")
        .insert_header(("X-Forwarded-For", "198.51.100.5"))
        .set_json(AuthorizeRequest {
            operation: "transcription".to_string(),
        })
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_unknown_operation_fails_open() {
    // Deliberate policy: operation names without a configured limiter are
    // admitted. Confirm before hardening to fail-closed.
    let (security, metrics) = app_parts(small_limits_config());
    let app = test::init_service(create_base_app(security, metrics)).await;

    for _ in 0..20 {
        let req = test::TestRequest::post()
            .uri("/api/authorize")
            .insert_header(("X-Forwarded-For", CLIENT_IP))
            .set_json(AuthorizeRequest {
                operation: "unknown_op".to_string(),
            })
            .to_request();
        let body: AuthorizeResponse = test::call_and_read_body_json(&app, req).await;
        assert!(body.allowed, "Unknown operations are fail-open");
        assert_eq!(body.remaining, None, "No quota applies to unknown operations");
    }
}

#[actix_web::test]
async fn test_blacklisted_client_gets_generic_denial() {
    let (security, metrics) = app_parts(small_limits_config());
    let app = test::init_service(create_base_app(security.clone(), metrics)).await;

    security.blacklist().add_to_blacklist(CLIENT_IP);

    let req = test::TestRequest::post()
        .uri("/api/authorize")
        .insert_header(("X-Forwarded-For", CLIENT_IP))
        .set_json(AuthorizeRequest {
            operation: "chat".to_string(),
        })
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body = test::read_body(resp).await;
    let message = std::str::from_utf8(&body).unwrap();
    assert!(
        message.contains("Access denied"),
        "Banned callers get the generic message: {message}"
    );
    assert!(
        !message.to_lowercase().contains("blacklist"),
        "The denial must not explain ban mechanics: {message}"
    );
}

#[actix_web::test]
async fn test_quota_endpoint_reads_without_consuming() {
    let (security, metrics) = app_parts(small_limits_config());
    let app = test::init_service(create_base_app(security, metrics)).await;

    // Any number of quota reads leaves admission state untouched.
    for _ in 0..10 {
        let req = test::TestRequest::get()
            .uri("/api/quota?operation=chat")
            .insert_header(("X-Forwarded-For", CLIENT_IP))
            .to_request();
        let body: QuotaResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.remaining, 2);
        assert_eq!(body.limit, 2);
        assert_eq!(body.window_seconds, 60);
    }

    let req = test::TestRequest::post()
        .uri("/api/authorize")
        .insert_header(("X-Forwarded-For", CLIENT_IP))
        .set_json(AuthorizeRequest {
            operation: "chat".to_string(),
        })
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/api/quota?operation=chat")
        .insert_header(("X-Forwarded-For", CLIENT_IP))
        .to_request();
    let body: QuotaResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body.remaining, 1, "Consumption shows up in the quota read");
}

#[actix_web::test]
async fn test_quota_for_unknown_operation_is_not_found() {
    let (security, metrics) = app_parts(small_limits_config());
    let app = test::init_service(create_base_app(security, metrics)).await;

    let req = test::TestRequest::get()
        .uri("/api/quota?operation=unknown_op")
        .insert_header(("X-Forwarded-For", CLIENT_IP))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_admin_ban_and_unban_flow() {
    // Public mode: admin endpoints are open, like the rest of the surface.
    let (security, metrics) = app_parts(small_limits_config());
    let app = test::init_service(create_base_app(security, metrics)).await;

    let req = test::TestRequest::post()
        .uri("/api/admin/blacklist")
        .set_json(BlacklistAddRequest {
            identifier: CLIENT_IP.to_string(),
            ttl_seconds: None,
        })
        .to_request();
    let body: BlacklistChangeResponse = test::call_and_read_body_json(&app, req).await;
    assert!(body.changed);

    // The ban is live at the gate.
    let req = test::TestRequest::post()
        .uri("/api/authorize")
        .insert_header(("X-Forwarded-For", CLIENT_IP))
        .set_json(AuthorizeRequest {
            operation: "chat".to_string(),
        })
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::delete()
        .uri("/api/admin/blacklist")
        .set_json(BlacklistRemoveRequest {
            identifier: CLIENT_IP.to_string(),
        })
        .to_request();
    let body: BlacklistChangeResponse = test::call_and_read_body_json(&app, req).await;
    assert!(body.changed, "Unban should report a removal");

    let req = test::TestRequest::post()
        .uri("/api/authorize")
        .insert_header(("X-Forwarded-For", CLIENT_IP))
        .set_json(AuthorizeRequest {
            operation: "chat".to_string(),
        })
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK, "Unbanned client is admitted");

    // Removing again reports nothing to remove.
    let req = test::TestRequest::delete()
        .uri("/api/admin/blacklist")
        .set_json(BlacklistRemoveRequest {
            identifier: CLIENT_IP.to_string(),
        })
        .to_request();
    let body: BlacklistChangeResponse = test::call_and_read_body_json(&app, req).await;
    assert!(!body.changed);
}

#[actix_web::test]
async fn test_admin_requires_session_when_auth_enabled() {
    let mut config = small_limits_config();
    config.auth.require_auth = true;
    config.auth.access_code = "open-sesame".to_string();
    let (security, metrics) = app_parts(config);
    let app = test::init_service(create_base_app(security.clone(), metrics)).await;

    // No session token: refused.
    let req = test::TestRequest::post()
        .uri("/api/admin/blacklist/cleanup")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // With a real session the sweep runs.
    let token = security.auth().create_session("operator");
    let req = test::TestRequest::post()
        .uri("/api/admin/blacklist/cleanup")
        .insert_header(("X-Session-Token", token.as_str()))
        .to_request();
    let body: CleanupResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body.removed, 0);
}

#[actix_web::test]
async fn test_stats_reflect_the_security_tables() {
    let (security, metrics) = app_parts(small_limits_config());
    let app = test::init_service(create_base_app(security.clone(), metrics)).await;

    security.auth().create_session("user1");
    security.blacklist().add_to_blacklist("10.0.0.1");
    security.blacklist().record_failed_attempt("10.0.0.2");

    let req = test::TestRequest::get()
        .uri("/api/security/stats")
        .to_request();
    let body: SecurityStatsResponse = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body.active_sessions, 1);
    assert_eq!(body.blacklist_size, 1);
    assert_eq!(body.tracked_failed_identifiers, 1);
}
