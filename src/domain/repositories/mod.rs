//! Repository trait definitions for the domain layer.
//!
//! These traits abstract the two pieces of shared state the service has: the
//! link collection and the sequence counter. Implementations live in
//! `crate::infrastructure`, and mock implementations are generated via
//! `mockall` for unit tests.
//!
//! # Available Traits
//!
//! - [`LinkRepository`] - Short link create/read/list/delete
//! - [`SequenceCounter`] - Monotonic counter backing code generation

pub mod counter;
pub mod link_repository;

pub use counter::SequenceCounter;
pub use link_repository::{LinkRepository, MAX_LIST_LIMIT};

#[cfg(test)]
pub use counter::MockSequenceCounter;
#[cfg(test)]
pub use link_repository::MockLinkRepository;
