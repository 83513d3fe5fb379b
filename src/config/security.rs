//! Security headers configuration.

use std::env;

/// Configuration for security headers middleware
#[derive(Clone)]
pub struct SecurityHeadersConfig {
    pub csp_enabled: bool,
    pub csp_directives: String,
    pub hsts_enabled: bool,
    pub hsts_max_age: u32,
    pub frame_options: String,
    pub content_type_options: bool,
    pub xss_protection: bool,
    pub referrer_policy: String,
}

impl Default for SecurityHeadersConfig {
    fn default() -> Self {
        Self {
            csp_enabled: true,
            csp_directives: "default-src 'self'; script-src 'self' 'unsafe-inline'; \
                             style-src 'self' 'unsafe-inline'"
                .to_string(),
            hsts_enabled: true,
            hsts_max_age: 31_536_000, // 1 year
            frame_options: "DENY".to_string(),
            content_type_options: true,
            xss_protection: true,
            referrer_policy: "strict-origin-when-cross-origin".to_string(),
        }
    }
}

impl SecurityHeadersConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let csp_enabled = env::var("SECURITY_CSP_ENABLED")
            .map(|v| v.to_lowercase() == "true")
            .unwrap_or(defaults.csp_enabled);

        let csp_directives = env::var("CSP_DIRECTIVES").unwrap_or(defaults.csp_directives);

        let hsts_enabled = env::var("HSTS_ENABLED")
            .map(|v| v.to_lowercase() == "true")
            .unwrap_or(defaults.hsts_enabled);

        let hsts_max_age = env::var("HSTS_MAX_AGE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.hsts_max_age);

        let frame_options = env::var("X_FRAME_OPTIONS").unwrap_or(defaults.frame_options);

        let content_type_options = env::var("X_CONTENT_TYPE_OPTIONS")
            .map(|v| v.to_lowercase() == "true")
            .unwrap_or(defaults.content_type_options);

        let xss_protection = env::var("X_XSS_PROTECTION")
            .map(|v| v.to_lowercase() == "true")
            .unwrap_or(defaults.xss_protection);

        let referrer_policy = env::var("REFERRER_POLICY").unwrap_or(defaults.referrer_policy);

        Self {
            csp_enabled,
            csp_directives,
            hsts_enabled,
            hsts_max_age,
            frame_options,
            content_type_options,
            xss_protection,
            referrer_policy,
        }
    }
}
