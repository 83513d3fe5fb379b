//! Rate limiting configuration.

use std::env;

/// Configuration for a single sliding-window rate limiter.
#[derive(Clone)]
pub struct RateLimitConfig {
    pub max_requests: usize,
    pub window_seconds: u64,
}

impl RateLimitConfig {
    pub fn new(max_requests: usize, window_seconds: u64) -> Self {
        Self {
            max_requests,
            window_seconds,
        }
    }
}

/// Per-operation request ceilings.
///
/// Transcription is the expensive operation and gets an hourly budget;
/// search and chat are interactive and limited per minute.
#[derive(Clone)]
pub struct OperationLimits {
    pub transcription: RateLimitConfig,
    pub search: RateLimitConfig,
    pub chat: RateLimitConfig,
}

impl Default for OperationLimits {
    fn default() -> Self {
        Self {
            transcription: RateLimitConfig::new(5, 3600),
            search: RateLimitConfig::new(20, 60),
            chat: RateLimitConfig::new(10, 60),
        }
    }
}

impl OperationLimits {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let transcriptions_per_hour = env::var("MAX_TRANSCRIPTIONS_PER_HOUR")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(5);

        let searches_per_minute = env::var("MAX_SEARCHES_PER_MINUTE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(20);

        let chats_per_minute = env::var("MAX_CHATS_PER_MINUTE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10);

        Self {
            transcription: RateLimitConfig::new(transcriptions_per_hour, 3600),
            search: RateLimitConfig::new(searches_per_minute, 60),
            chat: RateLimitConfig::new(chats_per_minute, 60),
        }
    }
}
