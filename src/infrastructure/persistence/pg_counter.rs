//! PostgreSQL implementation of the sequence counter.

use async_trait::async_trait;
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::repositories::SequenceCounter;
use crate::error::AppError;

/// Durable counter stored as a named row in the `counters` table.
///
/// The increment is one `INSERT .. ON CONFLICT DO UPDATE .. RETURNING`
/// statement, so concurrent callers are serialized by the row lock and never
/// observe the same value. A configured floor above the stored value moves the
/// counter forward; the stored value is never lowered.
pub struct PgSequenceCounter {
    pool: Arc<PgPool>,
    name: String,
    start: u64,
}

impl PgSequenceCounter {
    /// Creates a counter bound to the row `name`, issuing values above `start`.
    pub fn new(pool: Arc<PgPool>, name: impl Into<String>, start: u64) -> Self {
        Self {
            pool,
            name: name.into(),
            start,
        }
    }

    fn start_param(&self) -> Result<i64, AppError> {
        i64::try_from(self.start).map_err(|_| {
            AppError::internal(
                "Counter start is out of range",
                json!({ "start": self.start }),
            )
        })
    }
}

fn to_sequence_value(value: i64) -> Result<u64, AppError> {
    u64::try_from(value)
        .map_err(|_| AppError::internal("Counter holds a negative value", json!({ "value": value })))
}

#[async_trait]
impl SequenceCounter for PgSequenceCounter {
    async fn increment_and_get(&self) -> Result<u64, AppError> {
        let value: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO counters (name, value)
            VALUES ($1, $2 + 1)
            ON CONFLICT (name)
            DO UPDATE SET value = GREATEST(counters.value, $2) + 1
            RETURNING value
            "#,
        )
        .bind(&self.name)
        .bind(self.start_param()?)
        .fetch_one(self.pool.as_ref())
        .await?;

        to_sequence_value(value)
    }

    async fn current(&self) -> Result<u64, AppError> {
        let value: Option<i64> = sqlx::query_scalar("SELECT value FROM counters WHERE name = $1")
            .bind(&self.name)
            .fetch_optional(self.pool.as_ref())
            .await?;

        match value {
            Some(v) => Ok(to_sequence_value(v)?.max(self.start)),
            None => Ok(self.start),
        }
    }
}
