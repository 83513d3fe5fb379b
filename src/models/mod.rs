//! Data models and schemas for the Gatekeeper API.
//!
//! This module contains all the data structures used throughout the
//! application, including request/response models and audit event types.

pub mod api;
pub mod audit;
pub mod auth;

pub use api::*;
pub use audit::*;
pub use auth::*;
