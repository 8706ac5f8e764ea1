//! Application layer services implementing business logic.
//!
//! Services consume the domain traits and provide a clean API for HTTP
//! handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Short link creation, lookup, listing and removal
//! - [`services::auth_service::AuthService`] - Shared-secret API key check

pub mod services;
