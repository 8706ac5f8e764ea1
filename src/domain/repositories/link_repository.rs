//! Repository trait for short link data access.

use crate::domain::entities::{Link, NewLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Upper bound on the number of links a single `list` call returns.
pub const MAX_LIST_LIMIT: i64 = 1000;

/// Repository interface for managing short links.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::memory::MemoryLinkRepository`] - In-process implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_link.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Stores a new link, stamping `created_at` with the current time.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the code already exists.
    /// Returns [`AppError::Internal`] on storage errors.
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Finds a link by its short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError>;

    /// Lists links in creation order.
    ///
    /// Negative `skip` is treated as 0. `limit <= 0` means no explicit limit;
    /// the result is capped at [`MAX_LIST_LIMIT`] in every case.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn list(&self, limit: i64, skip: i64) -> Result<Vec<Link>, AppError>;

    /// Removes a link. Returns the number of removed records (0 or 1).
    ///
    /// Deleting an unknown code is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn delete(&self, code: &str) -> Result<u64, AppError>;

    /// Counts stored links.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn count(&self) -> Result<i64, AppError>;

    /// Checks that the backing store is reachable.
    async fn health_check(&self) -> bool;
}

/// Normalizes `(limit, skip)` into the effective `(limit, offset)` pair.
pub fn effective_window(limit: i64, skip: i64) -> (i64, i64) {
    let limit = if limit <= 0 {
        MAX_LIST_LIMIT
    } else {
        limit.min(MAX_LIST_LIMIT)
    };

    (limit, skip.max(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_window_passthrough() {
        assert_eq!(effective_window(2, 2), (2, 2));
    }

    #[test]
    fn test_effective_window_non_positive_limit() {
        assert_eq!(effective_window(0, 0), (MAX_LIST_LIMIT, 0));
        assert_eq!(effective_window(-5, 3), (MAX_LIST_LIMIT, 3));
    }

    #[test]
    fn test_effective_window_clamps() {
        assert_eq!(effective_window(MAX_LIST_LIMIT + 1, -1), (MAX_LIST_LIMIT, 0));
    }
}
