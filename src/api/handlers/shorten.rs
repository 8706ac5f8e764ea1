//! Handler for link shortening endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::link::LinkResponse;
use crate::api::dto::shorten::ShortenRequest;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link for a long URL.
///
/// # Endpoint
///
/// `POST /shorten?key=<AUTH_KEY>`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com/some/long/path" }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "id": 1,
///   "code": "gB0NV",
///   "longUrl": "https://example.com/some/long/path",
///   "shortUrl": "https://s.example.com/gB0NV",
///   "created": "2026-01-01T00:00:00Z"
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the body is not JSON or `url` is missing or empty.
/// Nothing is consumed from the sequence counter in that case.
/// Returns 500 Internal Server Error if the counter or the store fails.
pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<Json<LinkResponse>, AppError> {
    let Json(payload) = payload.map_err(|rejection| {
        AppError::bad_request(
            "Invalid request body",
            json!({ "reason": rejection.body_text() }),
        )
    })?;

    payload.validate()?;

    let long_url = payload.url.unwrap_or_default();
    let link = state.link_service.create_link(&long_url).await?;

    Ok(Json(link.into()))
}
