//! Authentication endpoint handlers.

use crate::{
    models::{
        audit::{SecurityAuditEvent, SecurityEventOutcome, SecurityEventType},
        auth::{
            LoginRequest, LoginResponse, LogoutResponse, SessionStatusResponse,
            SessionTokenRequest, SessionValidationResponse,
        },
    },
    services::{DenialReason, SecurityManager},
    utils::http::{extract_client_ip, extract_user_agent},
};
use actix_web::{Error, HttpMessage, HttpRequest, Result, web};
use paperclip::actix::api_v2_operation;

fn request_id(req: &HttpRequest) -> Option<String> {
    req.extensions().get::<String>().cloned()
}

/// Access-code login endpoint
///
/// Verifies the shared access code and returns a session token on success.
/// Failed attempts count toward the caller's blacklist threshold; a
/// blacklisted caller is denied before the code is even checked.
#[api_v2_operation(
    summary = "Login",
    description = "Verify the shared access code and create a session.",
    tags("Authentication"),
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid access code"),
        (status = 403, description = "Access denied")
    )
)]
pub async fn login(
    req: HttpRequest,
    payload: web::Json<LoginRequest>,
    security: web::Data<SecurityManager>,
) -> Result<web::Json<LoginResponse>, Error> {
    let ip_address = extract_client_ip(&req);
    let user_agent = extract_user_agent(&req);
    let method = req.method().to_string();
    let endpoint = req.uri().path().to_string();

    if security.blacklist().is_blacklisted(&ip_address) {
        SecurityAuditEvent::new(
            SecurityEventType::BlacklistHit,
            SecurityEventOutcome::Failure,
            ip_address,
            method,
            endpoint,
        )
        .with_user_agent(user_agent)
        .with_request_id(request_id(&req))
        .log();

        return Err(actix_web::error::ErrorForbidden(
            DenialReason::Blacklisted.to_string(),
        ));
    }

    if security.auth().verify_access_code(&payload.access_code) {
        let token = security.auth().create_session(&ip_address);

        SecurityAuditEvent::new(
            SecurityEventType::LoginSuccess,
            SecurityEventOutcome::Success,
            ip_address,
            method,
            endpoint,
        )
        .with_user_agent(user_agent)
        .with_request_id(request_id(&req))
        .log();

        Ok(web::Json(LoginResponse {
            success: true,
            token: Some(token),
            message: "Login successful".to_string(),
        }))
    } else {
        security.blacklist().record_failed_attempt(&ip_address);

        SecurityAuditEvent::new(
            SecurityEventType::LoginFailure,
            SecurityEventOutcome::Failure,
            ip_address,
            method,
            endpoint,
        )
        .with_user_agent(user_agent)
        .with_request_id(request_id(&req))
        .log();

        Err(actix_web::error::ErrorUnauthorized("Invalid access code"))
    }
}

/// Session validation endpoint
///
/// Checks a session token and refreshes its activity timestamp when valid.
/// A token past the idle timeout is rejected and deleted; the caller must
/// log in again.
#[api_v2_operation(
    summary = "Validate Session",
    description = "Validate a session token, refreshing its activity on success.",
    tags("Authentication"),
    responses(
        (status = 200, description = "Validation result", body = SessionValidationResponse)
    )
)]
pub async fn validate_session(
    req: HttpRequest,
    payload: web::Json<SessionTokenRequest>,
    security: web::Data<SecurityManager>,
) -> Result<web::Json<SessionValidationResponse>, Error> {
    let ip_address = extract_client_ip(&req);
    let method = req.method().to_string();
    let endpoint = req.uri().path().to_string();

    let valid = security.auth().verify_session(&payload.token);

    let (event_type, outcome, message) = if valid {
        (
            SecurityEventType::SessionValidated,
            SecurityEventOutcome::Success,
            "Session is valid",
        )
    } else {
        (
            SecurityEventType::SessionRejected,
            SecurityEventOutcome::Failure,
            "Session expired or invalid. Please log in again.",
        )
    };

    SecurityAuditEvent::new(event_type, outcome, ip_address, method, endpoint)
        .with_user_agent(extract_user_agent(&req))
        .with_request_id(request_id(&req))
        .log();

    Ok(web::Json(SessionValidationResponse {
        valid,
        message: message.to_string(),
    }))
}

/// Logout endpoint
///
/// Destroys the session identified by the token, if it exists.
#[api_v2_operation(
    summary = "Logout",
    description = "Destroy a session.",
    tags("Authentication"),
    responses(
        (status = 200, description = "Logout result", body = LogoutResponse)
    )
)]
pub async fn logout(
    req: HttpRequest,
    payload: web::Json<SessionTokenRequest>,
    security: web::Data<SecurityManager>,
) -> Result<web::Json<LogoutResponse>, Error> {
    let removed = security.auth().destroy_session(&payload.token);

    if removed {
        SecurityAuditEvent::new(
            SecurityEventType::SessionDestroyed,
            SecurityEventOutcome::Success,
            extract_client_ip(&req),
            req.method().to_string(),
            req.uri().path().to_string(),
        )
        .with_request_id(request_id(&req))
        .log();
    }

    let message = if removed {
        "Session destroyed"
    } else {
        "No such session"
    };

    Ok(web::Json(LogoutResponse {
        removed,
        message: message.to_string(),
    }))
}

/// Session status endpoint
///
/// Read-only lookup for status displays; does not refresh the session's
/// activity timestamp.
#[api_v2_operation(
    summary = "Session Status",
    description = "Return read-only details for a session token.",
    tags("Authentication"),
    responses(
        (status = 200, description = "Session details", body = SessionStatusResponse),
        (status = 404, description = "Unknown or expired session")
    )
)]
pub async fn session_status(
    payload: web::Json<SessionTokenRequest>,
    security: web::Data<SecurityManager>,
) -> Result<web::Json<SessionStatusResponse>, Error> {
    match security.auth().get_session(&payload.token) {
        Some(session) => Ok(web::Json(SessionStatusResponse {
            owner: session.owner.clone(),
            authenticated: session.authenticated,
            age_seconds: session.created_at.elapsed().as_secs(),
            idle_seconds: session.last_activity.elapsed().as_secs(),
        })),
        None => Err(actix_web::error::ErrorNotFound("Session not found")),
    }
}
