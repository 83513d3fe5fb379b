//! Operator endpoints: manual bans, bulk sweeps, and dashboard stats.
//!
//! When authentication is required these endpoints demand a valid session
//! token in `X-Session-Token`; in public mode they are open, matching the
//! rest of the surface.

use crate::{
    models::{
        BlacklistAddRequest, BlacklistChangeResponse, BlacklistRemoveRequest, CleanupResponse,
        SecurityStatsResponse,
        audit::{SecurityAuditEvent, SecurityEventOutcome, SecurityEventType},
    },
    services::SecurityManager,
    utils::http::extract_client_ip,
};
use actix_web::{Error, HttpRequest, Result, web};
use paperclip::actix::api_v2_operation;
use std::time::Duration;

fn require_session(req: &HttpRequest, security: &SecurityManager) -> Result<(), Error> {
    let token = req
        .headers()
        .get("X-Session-Token")
        .and_then(|h| h.to_str().ok())
        .unwrap_or("");

    if security.auth().verify_session(token) {
        Ok(())
    } else {
        Err(actix_web::error::ErrorUnauthorized(
            "Session expired or invalid. Please log in again.",
        ))
    }
}

/// Manual ban endpoint
#[api_v2_operation(
    summary = "Add to Blacklist",
    description = "Ban an identifier, with an optional TTL override.",
    tags("Admin"),
    responses(
        (status = 200, description = "Identifier banned", body = BlacklistChangeResponse),
        (status = 401, description = "Session required")
    )
)]
pub async fn add_to_blacklist(
    req: HttpRequest,
    payload: web::Json<BlacklistAddRequest>,
    security: web::Data<SecurityManager>,
) -> Result<web::Json<BlacklistChangeResponse>, Error> {
    require_session(&req, &security)?;

    match payload.ttl_seconds {
        Some(ttl) => security
            .blacklist()
            .add_to_blacklist_with_ttl(&payload.identifier, Duration::from_secs(ttl)),
        None => security.blacklist().add_to_blacklist(&payload.identifier),
    }

    SecurityAuditEvent::new(
        SecurityEventType::BlacklistAdded,
        SecurityEventOutcome::Success,
        extract_client_ip(&req),
        req.method().to_string(),
        req.uri().path().to_string(),
    )
    .with_details(Some(format!("banned {}", payload.identifier)))
    .log();

    Ok(web::Json(BlacklistChangeResponse {
        identifier: payload.identifier.clone(),
        changed: true,
        message: "Identifier added to blacklist".to_string(),
    }))
}

/// Manual unban endpoint
///
/// Removing an identifier also resets its failed-attempt counter: unbanning
/// forgives prior strikes.
#[api_v2_operation(
    summary = "Remove from Blacklist",
    description = "Unban an identifier and reset its failed-attempt counter.",
    tags("Admin"),
    responses(
        (status = 200, description = "Removal result", body = BlacklistChangeResponse),
        (status = 401, description = "Session required")
    )
)]
pub async fn remove_from_blacklist(
    req: HttpRequest,
    payload: web::Json<BlacklistRemoveRequest>,
    security: web::Data<SecurityManager>,
) -> Result<web::Json<BlacklistChangeResponse>, Error> {
    require_session(&req, &security)?;

    let removed = security.blacklist().remove_from_blacklist(&payload.identifier);

    if removed {
        SecurityAuditEvent::new(
            SecurityEventType::BlacklistRemoved,
            SecurityEventOutcome::Success,
            extract_client_ip(&req),
            req.method().to_string(),
            req.uri().path().to_string(),
        )
        .with_details(Some(format!("unbanned {}", payload.identifier)))
        .log();
    }

    let message = if removed {
        "Identifier removed from blacklist"
    } else {
        "Identifier was not blacklisted"
    };

    Ok(web::Json(BlacklistChangeResponse {
        identifier: payload.identifier.clone(),
        changed: removed,
        message: message.to_string(),
    }))
}

/// Blacklist sweep endpoint
#[api_v2_operation(
    summary = "Cleanup Blacklist",
    description = "Sweep all expired blacklist entries.",
    tags("Admin"),
    responses(
        (status = 200, description = "Sweep result", body = CleanupResponse),
        (status = 401, description = "Session required")
    )
)]
pub async fn cleanup_blacklist(
    req: HttpRequest,
    security: web::Data<SecurityManager>,
) -> Result<web::Json<CleanupResponse>, Error> {
    require_session(&req, &security)?;

    let removed = security.blacklist().cleanup_blacklist();
    Ok(web::Json(CleanupResponse { removed }))
}

/// Session sweep endpoint
#[api_v2_operation(
    summary = "Cleanup Sessions",
    description = "Sweep all sessions past the idle timeout.",
    tags("Admin"),
    responses(
        (status = 200, description = "Sweep result", body = CleanupResponse),
        (status = 401, description = "Session required")
    )
)]
pub async fn cleanup_sessions(
    req: HttpRequest,
    security: web::Data<SecurityManager>,
) -> Result<web::Json<CleanupResponse>, Error> {
    require_session(&req, &security)?;

    let removed = security.auth().cleanup_expired_sessions();
    Ok(web::Json(CleanupResponse { removed }))
}

/// Security stats endpoint
///
/// Dashboard snapshot of the session, blacklist, and failed-attempt tables.
#[api_v2_operation(
    summary = "Security Stats",
    description = "Return the current size of the security tables.",
    tags("Admin"),
    responses(
        (status = 200, description = "Current table sizes", body = SecurityStatsResponse)
    )
)]
pub async fn security_stats(
    security: web::Data<SecurityManager>,
) -> Result<web::Json<SecurityStatsResponse>, Error> {
    Ok(web::Json(SecurityStatsResponse {
        active_sessions: security.active_session_count(),
        blacklist_size: security.blacklist_size(),
        tracked_failed_identifiers: security.failed_attempt_identifiers(),
    }))
}
