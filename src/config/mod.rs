//! Configuration structures and loading utilities.
//!
//! Each security concern has its own config struct with environment loading
//! and defaults. `SecurityConfig` aggregates everything the
//! `SecurityManager` needs; `validate` runs once at startup and rejects
//! configurations that would make the gate meaningless.

pub mod auth;
pub mod blacklist;
pub mod metrics;
pub mod rate_limit;
pub mod security;

pub use auth::*;
pub use blacklist::*;
pub use metrics::*;
pub use rate_limit::*;
pub use security::*;

use thiserror::Error;

/// A configuration problem that must abort startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{field} must be greater than zero")]
    ZeroValue { field: &'static str },
    #[error("REQUIRE_AUTH is enabled but ACCESS_CODE is empty")]
    MissingAccessCode,
}

/// Aggregate configuration for the access-control subsystem.
#[derive(Clone, Default)]
pub struct SecurityConfig {
    pub auth: AuthConfig,
    pub limits: OperationLimits,
    pub blacklist: BlacklistConfig,
}

impl SecurityConfig {
    /// Load all security configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            auth: AuthConfig::from_env(),
            limits: OperationLimits::from_env(),
            blacklist: BlacklistConfig::from_env(),
        }
    }

    /// Reject configurations that cannot enforce anything.
    ///
    /// Expected denials are ordinary return values elsewhere; this is the one
    /// place where an error is fatal by design.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (limit, name_requests, name_window) in [
            (
                &self.limits.transcription,
                "MAX_TRANSCRIPTIONS_PER_HOUR",
                "transcription window",
            ),
            (&self.limits.search, "MAX_SEARCHES_PER_MINUTE", "search window"),
            (&self.limits.chat, "MAX_CHATS_PER_MINUTE", "chat window"),
        ] {
            if limit.max_requests == 0 {
                return Err(ConfigError::ZeroValue {
                    field: name_requests,
                });
            }
            if limit.window_seconds == 0 {
                return Err(ConfigError::ZeroValue { field: name_window });
            }
        }

        if self.blacklist.max_failed_attempts == 0 {
            return Err(ConfigError::ZeroValue {
                field: "MAX_FAILED_ATTEMPTS",
            });
        }
        if self.blacklist.ttl_seconds == 0 {
            return Err(ConfigError::ZeroValue {
                field: "BLACKLIST_TTL_SECONDS",
            });
        }
        if self.auth.session_timeout_seconds == 0 {
            return Err(ConfigError::ZeroValue {
                field: "SESSION_TIMEOUT_SECONDS",
            });
        }
        if self.auth.require_auth && self.auth.access_code.is_empty() {
            return Err(ConfigError::MissingAccessCode);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(SecurityConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_window_is_rejected() {
        let mut config = SecurityConfig::default();
        config.limits.search.window_seconds = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn auth_without_access_code_is_rejected() {
        let mut config = SecurityConfig::default();
        config.auth.require_auth = true;
        config.auth.access_code.clear();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingAccessCode)
        ));
    }

    #[test]
    fn auth_with_access_code_is_accepted() {
        let mut config = SecurityConfig::default();
        config.auth.require_auth = true;
        config.auth.access_code = "secret".to_string();
        assert!(config.validate().is_ok());
    }
}
