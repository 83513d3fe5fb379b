//! Temporary bans with TTL expiry and failed-attempt tracking.

use crate::config::BlacklistConfig;
use std::{
    collections::HashMap,
    sync::Mutex,
    time::{Duration, Instant},
};
use tracing::warn;

/// Tracks identifiers that are temporarily denied all access.
///
/// An identifier is blacklisted iff an entry exists and its expiry is still
/// in the future. Expired entries are removed lazily when read; an explicit
/// sweep is available for bulk cleanup. Failed login attempts accumulate per
/// identifier and promote it into the blacklist at the configured threshold.
///
/// The blacklist table and the failed-attempts table each have their own
/// lock, and no operation holds both at once.
pub struct BlacklistStore {
    config: BlacklistConfig,
    entries: Mutex<HashMap<String, Instant>>,
    failed_attempts: Mutex<HashMap<String, u32>>,
}

impl BlacklistStore {
    pub fn new(config: BlacklistConfig) -> Self {
        Self {
            config,
            entries: Mutex::new(HashMap::new()),
            failed_attempts: Mutex::new(HashMap::new()),
        }
    }

    /// Check whether `identifier` is currently banned.
    ///
    /// Reading an expired entry deletes it, so this is not side-effect-free;
    /// it only ever removes something already logically gone.
    pub fn is_blacklisted(&self, identifier: &str) -> bool {
        let mut entries = self.entries.lock().unwrap();
        let Some(&expiry) = entries.get(identifier) else {
            return false;
        };
        if Instant::now() >= expiry {
            entries.remove(identifier);
            return false;
        }
        true
    }

    /// Ban `identifier` for the configured default TTL.
    ///
    /// Re-adding restarts the TTL from now.
    pub fn add_to_blacklist(&self, identifier: &str) {
        self.add_to_blacklist_with_ttl(identifier, Duration::from_secs(self.config.ttl_seconds));
    }

    /// Ban `identifier` for an explicit duration (manual bans).
    pub fn add_to_blacklist_with_ttl(&self, identifier: &str, ttl: Duration) {
        let expiry = Instant::now() + ttl;
        self.entries
            .lock()
            .unwrap()
            .insert(identifier.to_string(), expiry);
        warn!(
            identifier = %identifier,
            ttl_seconds = ttl.as_secs(),
            "identifier added to blacklist"
        );
    }

    /// Manually unban `identifier`; returns whether an entry was removed.
    ///
    /// Unbanning forgives prior strikes: the failed-attempt counter resets
    /// here and only here. A ban that merely lapses via TTL keeps its
    /// counter, so one more failure can re-ban immediately.
    pub fn remove_from_blacklist(&self, identifier: &str) -> bool {
        let removed = self.entries.lock().unwrap().remove(identifier).is_some();
        if removed {
            self.failed_attempts.lock().unwrap().remove(identifier);
            warn!(identifier = %identifier, "identifier removed from blacklist");
        }
        removed
    }

    /// Sweep all expired entries; returns how many were removed.
    pub fn cleanup_blacklist(&self) -> usize {
        let mut entries = self.entries.lock().unwrap();
        let now = Instant::now();
        let before = entries.len();
        entries.retain(|_, expiry| now < *expiry);
        before - entries.len()
    }

    /// Record a failed login attempt for `identifier`.
    ///
    /// Reaching the threshold bans the identifier immediately. The counter
    /// itself is left untouched; only `remove_from_blacklist` resets it.
    pub fn record_failed_attempt(&self, identifier: &str) {
        let attempts = {
            let mut failed = self.failed_attempts.lock().unwrap();
            let count = failed.entry(identifier.to_string()).or_insert(0);
            *count += 1;
            *count
        };

        if attempts >= self.config.max_failed_attempts {
            self.add_to_blacklist(identifier);
        }
    }

    pub fn failed_attempt_count(&self, identifier: &str) -> u32 {
        self.failed_attempts
            .lock()
            .unwrap()
            .get(identifier)
            .copied()
            .unwrap_or(0)
    }

    /// Number of currently stored ban entries, expired or not.
    pub fn blacklist_len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    /// Number of identifiers with at least one recorded failed attempt.
    pub fn tracked_identifier_count(&self) -> usize {
        self.failed_attempts.lock().unwrap().len()
    }
}
