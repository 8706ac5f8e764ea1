//! In-memory implementation of link repository.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use tokio::sync::RwLock;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::domain::repositories::link_repository::effective_window;
use crate::error::AppError;

#[derive(Debug, Default)]
struct Inner {
    links: Vec<Link>,
    next_id: i64,
}

/// Insertion-ordered link store behind a [`RwLock`].
///
/// Uniqueness of `code` is checked under the write lock.
#[derive(Debug, Default)]
pub struct MemoryLinkRepository {
    inner: RwLock<Inner>,
}

impl MemoryLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LinkRepository for MemoryLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let mut inner = self.inner.write().await;

        if inner.links.iter().any(|l| l.code == new_link.code) {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": "links_code_key" }),
            ));
        }

        inner.next_id += 1;
        let link = Link::new(
            Some(inner.next_id),
            new_link.code,
            new_link.long_url,
            Utc::now(),
        );
        inner.links.push(link.clone());

        Ok(link)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner.links.iter().find(|l| l.code == code).cloned())
    }

    async fn list(&self, limit: i64, skip: i64) -> Result<Vec<Link>, AppError> {
        let (limit, offset) = effective_window(limit, skip);
        let inner = self.inner.read().await;

        Ok(inner
            .links
            .iter()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn delete(&self, code: &str) -> Result<u64, AppError> {
        let mut inner = self.inner.write().await;
        let before = inner.links.len();
        inner.links.retain(|l| l.code != code);
        Ok((before - inner.links.len()) as u64)
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.inner.read().await.links.len() as i64)
    }

    async fn health_check(&self) -> bool {
        true
    }
}
