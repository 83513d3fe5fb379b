//! Authentication-related data models.

use paperclip::actix::Apiv2Schema;
use serde::{Deserialize, Serialize};

/// Request model for access-code login
#[derive(Serialize, Deserialize, Apiv2Schema)]
pub struct LoginRequest {
    pub access_code: String,
}

/// Response model for login attempts
#[derive(Serialize, Deserialize, Apiv2Schema)]
pub struct LoginResponse {
    pub success: bool,
    pub token: Option<String>,
    pub message: String,
}

/// Request model carrying a session token
#[derive(Serialize, Deserialize, Apiv2Schema)]
pub struct SessionTokenRequest {
    pub token: String,
}

/// Response model for session validation
#[derive(Serialize, Deserialize, Apiv2Schema)]
pub struct SessionValidationResponse {
    pub valid: bool,
    pub message: String,
}

/// Response model for logout
#[derive(Serialize, Deserialize, Apiv2Schema)]
pub struct LogoutResponse {
    pub removed: bool,
    pub message: String,
}

/// Read-only session details for status displays
#[derive(Serialize, Deserialize, Apiv2Schema)]
pub struct SessionStatusResponse {
    pub owner: String,
    pub authenticated: bool,
    /// Seconds since the session was created
    pub age_seconds: u64,
    /// Seconds since the session was last used
    pub idle_seconds: u64,
}
