//! Pagination query parameters for `GET /links`.

use serde::Deserialize;
use serde_with::{DefaultOnError, DisplayFromStr, serde_as};

use crate::domain::repositories::link_repository::effective_window;

/// Skip/limit query parameters (`?s=10&l=20`).
///
/// Values are parsed from query strings as integers. An empty or non-numeric
/// value reads as absent, so `?l=` lists without an explicit limit.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    /// Number of links to skip.
    #[serde_as(as = "DefaultOnError<Option<DisplayFromStr>>")]
    #[serde(default)]
    pub s: Option<i64>,

    /// Maximum number of links to return.
    #[serde_as(as = "DefaultOnError<Option<DisplayFromStr>>")]
    #[serde(default)]
    pub l: Option<i64>,
}

impl ListParams {
    /// Returns the `(limit, skip)` pair actually applied by the store.
    ///
    /// Missing values default to no skip and no explicit limit.
    pub fn limit_skip(&self) -> (i64, i64) {
        effective_window(self.l.unwrap_or(0), self.s.unwrap_or(0))
    }
}
