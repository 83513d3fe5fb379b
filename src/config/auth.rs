//! Authentication configuration.

use std::env;

/// Configuration for access-code authentication and sessions.
///
/// When `require_auth` is false the deployment is public: access-code and
/// session checks pass unconditionally.
#[derive(Clone)]
pub struct AuthConfig {
    pub require_auth: bool,
    pub access_code: String,
    pub session_timeout_seconds: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            require_auth: false,
            access_code: String::new(),
            session_timeout_seconds: 86_400, // 24 hours
        }
    }
}

impl AuthConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let require_auth = env::var("REQUIRE_AUTH")
            .map(|v| v.to_lowercase() == "true")
            .unwrap_or(false);

        let access_code = env::var("ACCESS_CODE").unwrap_or_default();

        let session_timeout_seconds = env::var("SESSION_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(86_400);

        Self {
            require_auth,
            access_code,
            session_timeout_seconds,
        }
    }
}
