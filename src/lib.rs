//! Gatekeeper API - access control and abuse prevention for a
//! transcription/search/chat pipeline.
//!
//! The pipeline itself (media download, speech-to-text, retrieval, chat) is
//! an external collaborator; this crate is the gate in front of it:
//! - Sliding-window rate limiting per operation class
//! - Shared-access-code login with time-boxed opaque sessions
//! - Failed-attempt tracking with TTL-based temporary blacklisting
//! - Structured audit logging and Prometheus metrics
//!
//! ## Architecture
//!
//! The codebase is organized into focused modules:
//! - `models/` - Data structures and request/response models
//! - `handlers/` - HTTP request handlers for each endpoint
//! - `middleware/` - Custom middleware for cross-cutting concerns
//! - `services/` - The core access-control services
//! - `utils/` - Utility functions and helpers
//! - `config/` - Configuration structures and environment loading
//!
//! ## Quick Start
//!
//! ```no_run
//! use actix_web::web;
//! use gatekeeper_api::{
//!     config::SecurityConfig, create_base_app, AppMetrics, SecurityManager,
//! };
//!
//! #[actix_web::main]
//! async fn main() -> std::io::Result<()> {
//!     let security = web::Data::new(SecurityManager::new(SecurityConfig::from_env()));
//!     let metrics = web::Data::new(AppMetrics::new().expect("metrics registry"));
//!     let _app = create_base_app(security, metrics);
//!     // Configure and run the server
//!     Ok(())
//! }
//! ```

// Core modules
pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod utils;

// Re-export commonly used types and functions for convenience
pub use config::{
    AuthConfig, BlacklistConfig, ConfigError, MetricsConfig, OperationLimits, RateLimitConfig,
    SecurityConfig, SecurityHeadersConfig,
};
pub use handlers::{
    add_to_blacklist, authorize, cleanup_blacklist, cleanup_sessions, create_base_app,
    create_openapi_spec, get_metrics, health, login, logout, quota, remove_from_blacklist,
    security_stats, session_status, validate_session, version,
};
pub use middleware::{MetricsMiddleware, RequestIdMiddleware, SecurityHeaders};
pub use models::{
    AuthorizeRequest, AuthorizeResponse, BlacklistAddRequest, BlacklistChangeResponse,
    BlacklistRemoveRequest, CleanupResponse, HealthResponse, LoginRequest, LoginResponse,
    LogoutResponse, QuotaQuery, QuotaResponse, SecurityAuditEvent, SecurityEventOutcome,
    SecurityEventType, SecurityStatsResponse, SessionStatusResponse, SessionTokenRequest,
    SessionValidationResponse, VersionResponse,
};
pub use services::{
    AccessDecision, AppMetrics, AuthManager, BlacklistStore, DenialReason, RateDecision,
    RateLimiter, SecurityManager, Session,
};
pub use utils::{extract_client_ip, extract_route_pattern, extract_user_agent};
