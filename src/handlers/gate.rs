//! Pre-flight authorization gate handlers.
//!
//! The pipeline/UI layer calls `/api/authorize` before running a
//! transcription, search, or chat action; the core only answers admit/deny
//! and never sees URLs, media, or document content.

use crate::{
    models::{
        AuthorizeRequest, AuthorizeResponse, QuotaQuery, QuotaResponse,
        audit::{SecurityAuditEvent, SecurityEventOutcome, SecurityEventType},
    },
    services::{AccessDecision, AppMetrics, DenialReason, SecurityManager},
    utils::http::{extract_client_ip, extract_user_agent},
};
use actix_web::{Error, HttpRequest, Result, web};
use paperclip::actix::api_v2_operation;

/// Authorization gate endpoint
///
/// Runs the full gate for the requesting client: blacklist first, then the
/// operation's sliding-window limiter. Unknown operation names are admitted
/// (fail-open policy).
#[api_v2_operation(
    summary = "Authorize Operation",
    description = "Check whether the caller may run an operation right now.",
    tags("Gate"),
    responses(
        (status = 200, description = "Request admitted", body = AuthorizeResponse),
        (status = 403, description = "Access denied"),
        (status = 429, description = "Rate limit exceeded")
    )
)]
pub async fn authorize(
    req: HttpRequest,
    payload: web::Json<AuthorizeRequest>,
    security: web::Data<SecurityManager>,
    metrics: web::Data<AppMetrics>,
) -> Result<web::Json<AuthorizeResponse>, Error> {
    let identifier = extract_client_ip(&req);
    let operation = payload.operation.clone();

    let decision = security.check_rate_limit(&identifier, &operation);

    match decision {
        AccessDecision::Allowed => Ok(web::Json(AuthorizeResponse {
            allowed: true,
            remaining: security.remaining_quota(&identifier, &operation),
        })),
        AccessDecision::Denied(reason) => {
            let (event_type, metric_label) = match reason {
                DenialReason::Blacklisted => (SecurityEventType::BlacklistHit, "blacklist"),
                DenialReason::RateLimited { .. } => {
                    (SecurityEventType::RateLimitExceeded, "rate_limit")
                }
            };
            metrics.record_denial(metric_label);

            SecurityAuditEvent::new(
                event_type,
                SecurityEventOutcome::Failure,
                identifier,
                req.method().to_string(),
                req.uri().path().to_string(),
            )
            .with_user_agent(extract_user_agent(&req))
            .with_operation(Some(operation))
            .log();

            match reason {
                DenialReason::Blacklisted => {
                    Err(actix_web::error::ErrorForbidden(reason.to_string()))
                }
                DenialReason::RateLimited { .. } => {
                    Err(actix_web::error::ErrorTooManyRequests(reason.to_string()))
                }
            }
        }
    }
}

/// Quota endpoint
///
/// Read-only remaining-quota lookup for the requesting client. Never
/// consumes admission capacity.
#[api_v2_operation(
    summary = "Remaining Quota",
    description = "Return the caller's remaining requests for an operation.",
    tags("Gate"),
    responses(
        (status = 200, description = "Quota details", body = QuotaResponse),
        (status = 404, description = "Unknown operation name")
    )
)]
pub async fn quota(
    req: HttpRequest,
    query: web::Query<QuotaQuery>,
    security: web::Data<SecurityManager>,
) -> Result<web::Json<QuotaResponse>, Error> {
    let identifier = extract_client_ip(&req);
    let operation = query.operation.clone();

    let (limit, window_seconds) = security
        .operation_limit(&operation)
        .ok_or_else(|| actix_web::error::ErrorNotFound("Unknown operation name"))?;
    let remaining = security
        .remaining_quota(&identifier, &operation)
        .unwrap_or(limit);

    Ok(web::Json(QuotaResponse {
        operation,
        remaining,
        limit,
        window_seconds,
    }))
}
