//! Sliding-window rate limiting service.

use crate::config::RateLimitConfig;
use std::{
    collections::HashMap,
    sync::Mutex,
    time::{Duration, Instant},
};

/// Outcome of an admission check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RateDecision {
    /// The request was admitted and counted against the window.
    Allowed,
    /// The request was denied; retry after this many seconds.
    Denied { retry_after: u64 },
}

/// In-memory sliding-window rate limiter.
///
/// Keeps a log of request timestamps per identifier and admits a request
/// only while fewer than `max_requests` timestamps fall inside the trailing
/// window. Entries older than the window are purged at observation time, so
/// the window slides continuously rather than resetting in blocks.
pub struct RateLimiter {
    config: RateLimitConfig,
    windows: Mutex<HashMap<String, Vec<Instant>>>,
}

impl RateLimiter {
    /// Create a new rate limiter with the given configuration
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            windows: Mutex::new(HashMap::new()),
        }
    }

    /// Check whether `identifier` may make a request right now.
    ///
    /// An admitted request is recorded against the window; a denied one is
    /// not. Two requests within the same clock tick both count.
    pub fn is_allowed(&self, identifier: &str) -> RateDecision {
        let window = Duration::from_secs(self.config.window_seconds);
        let mut windows = self.windows.lock().unwrap();
        let now = Instant::now();

        let timestamps = windows.entry(identifier.to_string()).or_default();
        timestamps.retain(|t| now.duration_since(*t) < window);

        if timestamps.len() >= self.config.max_requests {
            // Timestamps are appended in order, so the first one is the
            // oldest still inside the window. Round the wait up so a denial
            // always reports at least one second.
            let oldest = timestamps.first().copied().unwrap_or(now);
            let elapsed = now.duration_since(oldest).as_secs_f64();
            let retry_after = (window.as_secs_f64() - elapsed).ceil() as u64;
            return RateDecision::Denied { retry_after };
        }

        timestamps.push(now);
        RateDecision::Allowed
    }

    /// Requests still available in the current window.
    ///
    /// Purges expired entries but never consumes admission capacity: calling
    /// this any number of times does not change a later `is_allowed` result.
    pub fn get_remaining(&self, identifier: &str) -> usize {
        let window = Duration::from_secs(self.config.window_seconds);
        let mut windows = self.windows.lock().unwrap();
        let now = Instant::now();

        match windows.get_mut(identifier) {
            Some(timestamps) => {
                timestamps.retain(|t| now.duration_since(*t) < window);
                self.config.max_requests.saturating_sub(timestamps.len())
            }
            None => self.config.max_requests,
        }
    }

    pub fn max_requests(&self) -> usize {
        self.config.max_requests
    }

    pub fn window_seconds(&self) -> u64 {
        self.config.window_seconds
    }
}
