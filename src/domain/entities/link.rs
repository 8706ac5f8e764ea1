//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};

/// A persisted short link.
///
/// `code` is the natural key used for lookup, redirect and delete. `id` is the
/// storage-internal identifier; it is `None` for backends that have no key
/// separate from the code. `short_url` is a display field derived from the
/// configured base URL and is never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub id: Option<i64>,
    pub code: String,
    pub long_url: String,
    pub short_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Creates a new Link instance without a display URL.
    pub fn new(
        id: Option<i64>,
        code: String,
        long_url: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            code,
            long_url,
            short_url: None,
            created_at,
        }
    }

    /// Returns the link with `short_url` set to `{base_url}/{code}`.
    ///
    /// An empty base URL leaves `short_url` unset.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.short_url = if base_url.is_empty() {
            None
        } else {
            Some(format!("{}/{}", base_url.trim_end_matches('/'), self.code))
        };
        self
    }
}

/// Input data for creating a new link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub code: String,
    pub long_url: String,
}
