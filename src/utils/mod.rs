//! Utility functions and helper modules.
//!
//! This module contains small helpers used throughout the application:
//! client identity extraction, route pattern extraction, and session token
//! generation.

pub mod http;
pub mod route;
pub mod token;

pub use http::*;
pub use route::*;
pub use token::*;
