//! HTTP middleware for request processing and protection.
//!
//! Provides shared-key authentication and request tracing.

pub mod auth;
pub mod tracing;
