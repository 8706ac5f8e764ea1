//! In-process adapters.
//!
//! Used when `STORAGE_BACKEND=memory` and by the HTTP tests. Nothing here
//! survives a restart.

mod counter;
mod link_repository;

pub use counter::MemorySequenceCounter;
pub use link_repository::MemoryLinkRepository;
