//! Atomic in-memory sequence counter.

use async_trait::async_trait;
use serde_json::json;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::repositories::SequenceCounter;
use crate::error::AppError;

/// Counter backed by a single [`AtomicU64`].
#[derive(Debug, Default)]
pub struct MemorySequenceCounter {
    value: AtomicU64,
}

impl MemorySequenceCounter {
    /// Creates a counter whose first issued value is `start + 1`.
    pub fn new(start: u64) -> Self {
        Self {
            value: AtomicU64::new(start),
        }
    }
}

#[async_trait]
impl SequenceCounter for MemorySequenceCounter {
    async fn increment_and_get(&self) -> Result<u64, AppError> {
        self.value
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |v| v.checked_add(1))
            .map(|previous| previous + 1)
            .map_err(|v| AppError::internal("Sequence counter exhausted", json!({ "value": v })))
    }

    async fn current(&self) -> Result<u64, AppError> {
        Ok(self.value.load(Ordering::SeqCst))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_starts_after_floor() {
        let counter = MemorySequenceCounter::new(41);
        assert_eq!(counter.increment_and_get().await.unwrap(), 42);
        assert_eq!(counter.increment_and_get().await.unwrap(), 43);
        assert_eq!(counter.current().await.unwrap(), 43);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_increments_are_unique_and_gapless() {
        const START: u64 = 100;
        const TASKS: u64 = 500;

        let counter = Arc::new(MemorySequenceCounter::new(START));

        let handles: Vec<_> = (0..TASKS)
            .map(|_| {
                let counter = counter.clone();
                tokio::spawn(async move { counter.increment_and_get().await.unwrap() })
            })
            .collect();

        let mut values = HashSet::new();
        for handle in handles {
            assert!(values.insert(handle.await.unwrap()));
        }

        let expected: HashSet<u64> = (START + 1..=START + TASKS).collect();
        assert_eq!(values, expected);
    }

    #[tokio::test]
    async fn test_exhausted_counter_fails() {
        let counter = MemorySequenceCounter::new(u64::MAX);
        assert!(matches!(
            counter.increment_and_get().await,
            Err(AppError::Internal { .. })
        ));
        assert_eq!(counter.current().await.unwrap(), u64::MAX);
    }
}
