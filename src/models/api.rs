//! API request and response models for standard endpoints.

use paperclip::actix::Apiv2Schema;
use serde::{Deserialize, Serialize};

/// Response model for the health check endpoint
#[derive(Clone, Serialize, Deserialize, Apiv2Schema)]
pub struct HealthResponse {
    pub status: String,
}

/// Response model for the version information endpoint
#[derive(Clone, Serialize, Deserialize, Apiv2Schema)]
pub struct VersionResponse {
    pub version: String,
    pub commit: String,
    pub build_time: String,
}

/// Request model for the pre-flight authorization gate
#[derive(Clone, Serialize, Deserialize, Apiv2Schema)]
pub struct AuthorizeRequest {
    /// Operation class: "transcription", "search" or "chat"
    pub operation: String,
}

/// Response model for an admitted request
#[derive(Clone, Serialize, Deserialize, Apiv2Schema)]
pub struct AuthorizeResponse {
    pub allowed: bool,
    /// Requests left in the current window, when the operation is rate limited
    pub remaining: Option<usize>,
}

/// Query parameters for the quota endpoint
#[derive(Clone, Serialize, Deserialize, Apiv2Schema)]
pub struct QuotaQuery {
    pub operation: String,
}

/// Response model for the quota endpoint
#[derive(Clone, Serialize, Deserialize, Apiv2Schema)]
pub struct QuotaResponse {
    pub operation: String,
    pub remaining: usize,
    pub limit: usize,
    pub window_seconds: u64,
}

/// Response model for the security stats endpoint
#[derive(Clone, Serialize, Deserialize, Apiv2Schema)]
pub struct SecurityStatsResponse {
    pub active_sessions: usize,
    pub blacklist_size: usize,
    /// Identifiers with at least one recorded failed attempt
    pub tracked_failed_identifiers: usize,
}

/// Request model for a manual ban
#[derive(Clone, Serialize, Deserialize, Apiv2Schema)]
pub struct BlacklistAddRequest {
    pub identifier: String,
    /// Ban duration; the configured default TTL applies when omitted
    pub ttl_seconds: Option<u64>,
}

/// Request model for a manual unban
#[derive(Clone, Serialize, Deserialize, Apiv2Schema)]
pub struct BlacklistRemoveRequest {
    pub identifier: String,
}

/// Response model for blacklist mutations
#[derive(Clone, Serialize, Deserialize, Apiv2Schema)]
pub struct BlacklistChangeResponse {
    pub identifier: String,
    pub changed: bool,
    pub message: String,
}

/// Response model for bulk cleanup sweeps
#[derive(Clone, Serialize, Deserialize, Apiv2Schema)]
pub struct CleanupResponse {
    pub removed: usize,
}
