//! Audit logging data structures and types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Types of security events for audit logging
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecurityEventType {
    LoginSuccess,
    LoginFailure,
    SessionValidated,
    SessionRejected,
    SessionDestroyed,
    RateLimitExceeded,
    BlacklistHit,
    BlacklistAdded,
    BlacklistRemoved,
}

/// Outcomes of security events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecurityEventOutcome {
    Success,
    Failure,
}

/// Structured audit log entry for security events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityAuditEvent {
    pub event_type: SecurityEventType,
    pub outcome: SecurityEventOutcome,
    pub timestamp: DateTime<Utc>,
    pub identifier: String,
    pub user_agent: Option<String>,
    pub method: String,
    pub endpoint: String,
    pub operation: Option<String>,
    pub request_id: Option<String>,
    pub details: Option<String>,
}

impl SecurityAuditEvent {
    /// Create a new audit event with basic information
    pub fn new(
        event_type: SecurityEventType,
        outcome: SecurityEventOutcome,
        identifier: String,
        method: String,
        endpoint: String,
    ) -> Self {
        Self {
            event_type,
            outcome,
            timestamp: Utc::now(),
            identifier,
            user_agent: None,
            method,
            endpoint,
            operation: None,
            request_id: None,
            details: None,
        }
    }

    /// Add user agent information
    pub fn with_user_agent(mut self, user_agent: Option<String>) -> Self {
        self.user_agent = user_agent;
        self
    }

    /// Add the operation class the event relates to
    pub fn with_operation(mut self, operation: Option<String>) -> Self {
        self.operation = operation;
        self
    }

    /// Add request ID information
    pub fn with_request_id(mut self, request_id: Option<String>) -> Self {
        self.request_id = request_id;
        self
    }

    /// Add free-form detail text
    pub fn with_details(mut self, details: Option<String>) -> Self {
        self.details = details;
        self
    }

    /// Log the audit event using structured logging
    pub fn log(&self) {
        info!(
            target: "security_audit",
            event_type = ?self.event_type,
            outcome = ?self.outcome,
            timestamp = %self.timestamp,
            identifier = %self.identifier,
            user_agent = ?self.user_agent,
            method = %self.method,
            endpoint = %self.endpoint,
            operation = ?self.operation,
            request_id = ?self.request_id,
            details = ?self.details,
            "Security audit event"
        );
    }
}
