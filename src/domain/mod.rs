//! Domain layer containing business entities and storage contracts.
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. Concrete adapters live in [`crate::infrastructure`].
//!
//! # Architecture
//!
//! - [`entities`] - Core data structures ([`entities::Link`])
//! - [`repositories`] - Storage and sequence traits implemented by adapters
//!
//! # Creation Flow
//!
//! 1. [`repositories::SequenceCounter::increment_and_get`] issues the next value
//! 2. [`crate::utils::code_encoder::CodeEncoder`] turns it into a code
//! 3. [`repositories::LinkRepository::create`] persists the `(code, url)` pair

pub mod entities;
pub mod repositories;
