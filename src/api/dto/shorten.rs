//! DTOs for link shortening endpoint.

use serde::Deserialize;
use validator::Validate;

/// Request to shorten a URL.
///
/// `url` is optional at the serde level so a missing field reaches validation
/// and produces the same 400 as an empty one.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    #[validate(required(message = r#"Missing required property "url""#))]
    pub url: Option<String>,
}
