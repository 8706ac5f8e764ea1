//! Static landing and not-found pages.

use std::path::{Path, PathBuf};

use axum::http::StatusCode;
use tower_http::services::ServeFile;
use tower_http::set_status::SetStatus;

/// File services for the two static pages under the public directory.
#[derive(Debug, Clone)]
pub struct Pages {
    dir: PathBuf,
}

impl Pages {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// `GET /`
    pub fn index(&self) -> ServeFile {
        ServeFile::new(self.dir.join("index.html"))
    }

    /// `GET /404`, served with 200 as the target of not-found redirects.
    pub fn not_found(&self) -> ServeFile {
        ServeFile::new(self.dir.join("404.html"))
    }

    /// Any unmatched path: the not-found page with status 404.
    pub fn fallback(&self) -> SetStatus<ServeFile> {
        SetStatus::new(self.not_found(), StatusCode::NOT_FOUND)
    }
}
