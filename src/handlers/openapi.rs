//! OpenAPI specification generation and app factory.

use crate::{
    config::{MetricsConfig, SecurityHeadersConfig},
    handlers::{
        add_to_blacklist, authorize, cleanup_blacklist, cleanup_sessions, get_metrics, health,
        login, logout, quota, remove_from_blacklist, security_stats, session_status,
        validate_session, version,
    },
    middleware::{MetricsMiddleware, RequestIdMiddleware, SecurityHeaders},
    services::{AppMetrics, SecurityManager},
};
use actix_web::App;
use paperclip::actix::{OpenApiExt, web};
use paperclip::v2::models::{DefaultApiRaw, Info};

/// Creates the shared OpenAPI specification for the API
pub fn create_openapi_spec() -> DefaultApiRaw {
    DefaultApiRaw {
        info: Info {
            title: "Gatekeeper API".into(),
            version: "1.0.0".into(),
            description: Some(
                "Access-control and abuse-prevention gate for a transcription/search/chat \
                 pipeline.\n\n\
                 ## Flow\n\
                 1. `POST /auth/login` with the shared access code to obtain a session token \
                 (skipped entirely when `REQUIRE_AUTH=false`).\n\
                 2. `POST /api/authorize` with an operation name (`transcription`, `search`, \
                 `chat`) before running the operation. The gate answers 200, 403 (banned) or \
                 429 (over quota) with a human-readable message.\n\
                 3. `GET /api/quota` reports the remaining window quota without consuming it.\n\
                 \n\
                 Repeated failed logins blacklist the caller for a configurable TTL. Denial \
                 messages for banned callers are deliberately generic.\n\
                 \n\
                 **Configuration (environment):**\n\
                 - `REQUIRE_AUTH`, `ACCESS_CODE`, `SESSION_TIMEOUT_SECONDS`\n\
                 - `MAX_TRANSCRIPTIONS_PER_HOUR`, `MAX_SEARCHES_PER_MINUTE`, `MAX_CHATS_PER_MINUTE`\n\
                 - `MAX_FAILED_ATTEMPTS`, `BLACKLIST_TTL_SECONDS`"
                    .into(),
            ),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Creates a basic app with shared configuration
///
/// The `SecurityManager` and `AppMetrics` are injected so every worker (and
/// every test) shares one set of tables; the factory only wires routes,
/// middleware, and the OpenAPI spec around them.
pub fn create_base_app(
    security: actix_web::web::Data<SecurityManager>,
    metrics: actix_web::web::Data<AppMetrics>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let headers_config = SecurityHeadersConfig::from_env();
    let metrics_config = MetricsConfig::from_env();

    App::new()
        .wrap(SecurityHeaders::new(headers_config))
        .wrap(RequestIdMiddleware)
        .wrap(MetricsMiddleware)
        .wrap_api_with_spec(create_openapi_spec())
        .app_data(security)
        .app_data(metrics)
        .app_data(actix_web::web::Data::new(metrics_config))
        .service(web::resource("/api/health").route(web::get().to(health)))
        .service(web::resource("/api/version").route(web::get().to(version)))
        .service(web::resource("/api/metrics").route(web::get().to(get_metrics)))
        .service(web::resource("/api/authorize").route(web::post().to(authorize)))
        .service(web::resource("/api/quota").route(web::get().to(quota)))
        .service(web::resource("/api/security/stats").route(web::get().to(security_stats)))
        .service(
            web::resource("/api/admin/blacklist")
                .route(web::post().to(add_to_blacklist))
                .route(web::delete().to(remove_from_blacklist)),
        )
        .service(
            web::resource("/api/admin/blacklist/cleanup").route(web::post().to(cleanup_blacklist)),
        )
        .service(
            web::resource("/api/admin/sessions/cleanup").route(web::post().to(cleanup_sessions)),
        )
        .service(web::resource("/auth/login").route(web::post().to(login)))
        .service(web::resource("/auth/validate").route(web::post().to(validate_session)))
        .service(web::resource("/auth/logout").route(web::post().to(logout)))
        .service(web::resource("/auth/session").route(web::post().to(session_status)))
        .with_json_spec_at("/api/spec/v2")
        .build()
}
