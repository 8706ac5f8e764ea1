//! Sequence counter trait.

use crate::error::AppError;
use async_trait::async_trait;

/// Process-wide monotonic counter used to derive short codes.
///
/// Every call to [`SequenceCounter::increment_and_get`] must return a value no
/// other call has returned, including across restarts. Implementations perform
/// the increment as a single atomic operation in the backing store.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgSequenceCounter`] - PostgreSQL row counter
/// - [`crate::infrastructure::memory::MemorySequenceCounter`] - `AtomicU64` counter
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SequenceCounter: Send + Sync {
    /// Atomically increments the counter and returns the new value.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the store is unavailable. No value is
    /// considered issued in that case.
    async fn increment_and_get(&self) -> Result<u64, AppError>;

    /// Returns the last issued value without changing it.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the store is unavailable.
    async fn current(&self) -> Result<u64, AppError>;
}
