//! Link creation and retrieval service.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, error, info, warn};

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::{LinkRepository, SequenceCounter};
use crate::error::AppError;
use crate::utils::code_encoder::CodeEncoder;

/// Codes that would shadow a fixed route and therefore are never handed out.
pub const RESERVED_CODES: &[&str] = &["links", "shorten", "health", "404"];

/// How many reserved codes in a row are skipped before giving up.
const MAX_RESERVED_SKIPS: usize = 8;

/// Service for creating and retrieving shortened links.
///
/// Creation always follows the same order: counter first, record second. A
/// failure after the increment leaves that value consumed and unused, which is
/// harmless; a code is never derived from a value that was issued twice.
pub struct LinkService {
    link_repository: Arc<dyn LinkRepository>,
    counter: Arc<dyn SequenceCounter>,
    encoder: CodeEncoder,
    base_url: String,
}

impl LinkService {
    /// Creates a new link service.
    pub fn new(
        link_repository: Arc<dyn LinkRepository>,
        counter: Arc<dyn SequenceCounter>,
        encoder: CodeEncoder,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            link_repository,
            counter,
            encoder,
            base_url: base_url.into(),
        }
    }

    /// Shortens `long_url`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL is empty; the counter is
    /// not touched in that case. Any other string is stored as given.
    ///
    /// Returns [`AppError::Internal`] if the counter or the store fails,
    /// including when the derived code is already taken.
    pub async fn create_link(&self, long_url: &str) -> Result<Link, AppError> {
        if long_url.is_empty() {
            return Err(missing_url());
        }

        let code = self.next_code().await?;

        let link = self
            .link_repository
            .create(NewLink {
                code: code.clone(),
                long_url: long_url.to_string(),
            })
            .await
            .map_err(|e| match e {
                AppError::Conflict { message, .. } => {
                    error!(code = %code, %message, "Issued code already stored");
                    AppError::internal(
                        "Failed to create link",
                        json!({ "reason": "Code already in use" }),
                    )
                }
                other => other,
            })?;

        info!(code = %link.code, "Link created");

        Ok(self.decorate(link))
    }

    /// Retrieves a link by its short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches the code.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn get_link(&self, code: &str) -> Result<Link, AppError> {
        match self.link_repository.find_by_code(code).await? {
            Some(link) => Ok(self.decorate(link)),
            None => {
                debug!(code, "Short link not found");
                Err(AppError::not_found(
                    "Short link not found",
                    json!({ "code": code }),
                ))
            }
        }
    }

    /// Lists links in creation order.
    ///
    /// See [`LinkRepository::list`] for how `limit` and `skip` are interpreted.
    pub async fn list_links(&self, limit: i64, skip: i64) -> Result<Vec<Link>, AppError> {
        let links = self.link_repository.list(limit, skip).await?;
        Ok(links.into_iter().map(|l| self.decorate(l)).collect())
    }

    /// Deletes a link, returning the number of removed records (0 or 1).
    pub async fn delete_link(&self, code: &str) -> Result<u64, AppError> {
        let deleted = self.link_repository.delete(code).await?;

        if deleted > 0 {
            info!(code, "Link deleted");
        }

        Ok(deleted)
    }

    /// Counter value `code` was derived from, if it was issued under the
    /// current encoder settings.
    pub fn sequence_of(&self, code: &str) -> Option<u64> {
        self.encoder.decode(code).ok()
    }

    /// Number of stored links.
    pub async fn count_links(&self) -> Result<i64, AppError> {
        self.link_repository.count().await
    }

    /// Last value issued by the sequence counter.
    pub async fn current_sequence(&self) -> Result<u64, AppError> {
        self.counter.current().await
    }

    /// Returns `true` if the link store is reachable.
    pub async fn store_healthy(&self) -> bool {
        self.link_repository.health_check().await
    }

    /// Draws counter values until one encodes to a non-reserved code.
    async fn next_code(&self) -> Result<String, AppError> {
        for _ in 0..MAX_RESERVED_SKIPS {
            let value = self.counter.increment_and_get().await?;
            let code = self.encoder.encode(value);

            if is_reserved_code(&code) {
                warn!(value, code = %code, "Skipping reserved code");
                continue;
            }

            return Ok(code);
        }

        Err(AppError::internal(
            "Failed to generate code",
            json!({ "reason": "Too many reserved codes" }),
        ))
    }

    fn decorate(&self, link: Link) -> Link {
        link.with_base_url(&self.base_url)
    }
}

/// Returns `true` if `code` collides with a fixed route.
pub fn is_reserved_code(code: &str) -> bool {
    RESERVED_CODES.contains(&code)
}

fn missing_url() -> AppError {
    AppError::bad_request(
        r#"Missing required property "url""#,
        json!({ "field": "url" }),
    )
}
