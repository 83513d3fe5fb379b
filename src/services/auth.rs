//! Access-code verification and session management.

use crate::{config::AuthConfig, utils::token::generate_session_token};
use std::{
    collections::HashMap,
    sync::Mutex,
    time::{Duration, Instant},
};
use subtle::ConstantTimeEq;
use tracing::debug;

/// An authenticated session, keyed by an opaque token in the session table.
#[derive(Debug, Clone)]
pub struct Session {
    pub owner: String,
    pub created_at: Instant,
    pub last_activity: Instant,
    pub authenticated: bool,
}

/// Session and access-code manager.
///
/// When authentication is disabled the deployment is public and every check
/// passes without touching the session table. All session-table mutations go
/// through a single lock so a concurrent reader never observes a
/// half-updated entry.
pub struct AuthManager {
    config: AuthConfig,
    sessions: Mutex<HashMap<String, Session>>,
}

impl AuthManager {
    pub fn new(config: AuthConfig) -> Self {
        Self {
            config,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    pub fn require_auth(&self) -> bool {
        self.config.require_auth
    }

    /// Verify the shared access code.
    ///
    /// The comparison is constant-time to avoid leaking how much of the code
    /// matched.
    pub fn verify_access_code(&self, code: &str) -> bool {
        if !self.config.require_auth {
            return true;
        }
        code.as_bytes()
            .ct_eq(self.config.access_code.as_bytes())
            .into()
    }

    /// Create a session for `owner` and return its opaque token.
    pub fn create_session(&self, owner: &str) -> String {
        let token = generate_session_token();
        let now = Instant::now();
        let session = Session {
            owner: owner.to_string(),
            created_at: now,
            last_activity: now,
            authenticated: true,
        };
        self.sessions.lock().unwrap().insert(token.clone(), session);
        debug!(owner = %owner, "session created");
        token
    }

    /// Verify a session token, refreshing its activity timestamp on success.
    ///
    /// A session that has been idle longer than the timeout is deleted on
    /// first sight and cannot be revived; any activity inside the timeout
    /// extends the session.
    pub fn verify_session(&self, token: &str) -> bool {
        if !self.config.require_auth {
            return true;
        }

        let timeout = Duration::from_secs(self.config.session_timeout_seconds);
        let mut sessions = self.sessions.lock().unwrap();
        let now = Instant::now();

        let expired = match sessions.get_mut(token) {
            None => return false,
            Some(session) => {
                if now.duration_since(session.last_activity) > timeout {
                    true
                } else {
                    session.last_activity = now;
                    false
                }
            }
        };

        if expired {
            sessions.remove(token);
            debug!("expired session removed on verification");
            return false;
        }
        true
    }

    /// Read-only session snapshot for status displays.
    ///
    /// Does not refresh activity and does not delete anything; a timed-out
    /// session simply reads as absent.
    pub fn get_session(&self, token: &str) -> Option<Session> {
        let timeout = Duration::from_secs(self.config.session_timeout_seconds);
        let now = Instant::now();
        self.sessions
            .lock()
            .unwrap()
            .get(token)
            .filter(|session| now.duration_since(session.last_activity) <= timeout)
            .cloned()
    }

    /// Remove a session; returns whether one was removed.
    pub fn destroy_session(&self, token: &str) -> bool {
        self.sessions.lock().unwrap().remove(token).is_some()
    }

    /// Sweep the whole table, removing every session past the timeout.
    ///
    /// The request path does not need this (`verify_session` self-heals
    /// lazily); it exists for operators and tests.
    pub fn cleanup_expired_sessions(&self) -> usize {
        let timeout = Duration::from_secs(self.config.session_timeout_seconds);
        let mut sessions = self.sessions.lock().unwrap();
        let now = Instant::now();
        let before = sessions.len();
        sessions.retain(|_, session| now.duration_since(session.last_activity) <= timeout);
        before - sessions.len()
    }

    pub fn active_session_count(&self) -> usize {
        self.sessions.lock().unwrap().len()
    }
}
