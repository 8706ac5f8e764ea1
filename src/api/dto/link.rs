//! JSON representation of a stored link.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::Link;

/// Link as returned by `/shorten` and `/links`.
///
/// ```json
/// {
///   "id": 1,
///   "code": "gB0NV",
///   "longUrl": "https://example.com",
///   "shortUrl": "https://s.example.com/gB0NV",
///   "created": "2026-01-01T00:00:00Z"
/// }
/// ```
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub code: String,
    pub long_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_url: Option<String>,
    #[serde(rename = "created")]
    pub created_at: DateTime<Utc>,
}

impl From<Link> for LinkResponse {
    fn from(link: Link) -> Self {
        Self {
            id: link.id,
            code: link.code,
            long_url: link.long_url,
            short_url: link.short_url,
            created_at: link.created_at,
        }
    }
}

/// Result of `DELETE /links/{code}`.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub deleted: u64,
}
