//! Blacklist and failed-attempt configuration.

use std::env;

/// Configuration for temporary bans.
#[derive(Clone)]
pub struct BlacklistConfig {
    /// Failed login attempts before an identifier is banned.
    pub max_failed_attempts: u32,
    /// How long an automatic or default manual ban lasts.
    pub ttl_seconds: u64,
}

impl Default for BlacklistConfig {
    fn default() -> Self {
        Self {
            max_failed_attempts: 5,
            ttl_seconds: 3600,
        }
    }
}

impl BlacklistConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let max_failed_attempts = env::var("MAX_FAILED_ATTEMPTS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(5);

        let ttl_seconds = env::var("BLACKLIST_TTL_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(3600);

        Self {
            max_failed_attempts,
            ttl_seconds,
        }
    }
}
