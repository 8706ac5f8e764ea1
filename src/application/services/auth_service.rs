//! Authentication service for the shared API key.

use serde_json::json;
use sha2::{Digest, Sha256};

use crate::error::AppError;

/// Checks API keys against the single configured secret.
///
/// Only the SHA-256 digest of the secret is kept, and candidates are compared
/// digest to digest so the comparison does not depend on the key length.
#[derive(Clone)]
pub struct AuthService {
    key_digest: [u8; 32],
}

impl AuthService {
    /// Creates a service accepting exactly `key`.
    pub fn new(key: &str) -> Self {
        Self {
            key_digest: digest(key),
        }
    }

    /// Authenticates a key taken from the request.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the key is missing or does not match.
    pub fn authenticate(&self, key: Option<&str>) -> Result<(), AppError> {
        let Some(key) = key.filter(|k| !k.is_empty()) else {
            return Err(AppError::unauthorized(
                "Unauthorized",
                json!({ "reason": "Missing key in query string" }),
            ));
        };

        if digest(key) != self.key_digest {
            return Err(AppError::unauthorized(
                "Unauthorized",
                json!({ "reason": "Invalid key" }),
            ));
        }

        Ok(())
    }
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService").finish_non_exhaustive()
    }
}

fn digest(key: &str) -> [u8; 32] {
    Sha256::digest(key.as_bytes()).into()
}
