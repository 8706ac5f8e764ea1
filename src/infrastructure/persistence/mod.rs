//! PostgreSQL adapters.
//!
//! Concrete implementations of the domain traits using SQLx runtime-checked
//! queries. The schema lives in `migrations/` and is applied at startup.
//!
//! # Adapters
//!
//! - [`PgLinkRepository`] - Link storage and retrieval
//! - [`PgSequenceCounter`] - Atomic, durable code counter

pub mod pg_counter;
pub mod pg_link_repository;

pub use pg_counter::PgSequenceCounter;
pub use pg_link_repository::PgLinkRepository;
