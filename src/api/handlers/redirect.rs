//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Redirect, Response},
};
use serde_json::json;
use tracing::warn;

use crate::error::AppError;
use crate::state::AppState;

/// Path of the not-found page unknown codes are sent to.
pub const NOT_FOUND_PATH: &str = "/404";

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Behavior
///
/// - Known code: **301 Moved Permanently** to the stored long URL
/// - Unknown code: **307 Temporary Redirect** to `/404`
///
/// # Errors
///
/// Returns 500 Internal Server Error if the store fails or the stored URL
/// cannot be used as a `Location` header.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    match state.link_service.get_link(&code).await {
        Ok(link) => permanent_redirect(&link.long_url),
        Err(AppError::NotFound { .. }) => Ok(Redirect::temporary(NOT_FOUND_PATH).into_response()),
        Err(e) => Err(e),
    }
}

/// Builds a 301 response. Stored URLs are caller input, so a value that is not
/// a valid header is reported instead of panicking.
fn permanent_redirect(location: &str) -> Result<Response, AppError> {
    let value = HeaderValue::from_bytes(location.as_bytes()).map_err(|e| {
        warn!(error = %e, "Stored URL is not a valid Location header");
        AppError::internal("Invalid redirect target", json!({}))
    })?;

    Ok((StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, value)]).into_response())
}
