//! Infrastructure layer for external integrations.
//!
//! Implements the traits defined by the domain layer.
//!
//! # Modules
//!
//! - [`persistence`] - PostgreSQL adapters (durable, used in production)
//! - [`memory`] - In-process adapters (development and tests; lost on restart)

pub mod memory;
pub mod persistence;
