//! Handlers for link management endpoints (list, show, delete).

use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
};
use serde_json::json;

use crate::api::dto::link::{DeleteResponse, LinkResponse};
use crate::api::dto::pagination::ListParams;
use crate::error::AppError;
use crate::state::AppState;

/// Lists links in creation order.
///
/// # Endpoint
///
/// `GET /links?key=<AUTH_KEY>&s=<skip>&l=<limit>`
///
/// # Query Parameters
///
/// - `s` - number of links to skip (negative values count as 0)
/// - `l` - maximum number of links (0 or negative returns up to the server cap)
///
/// Empty or non-numeric values are read as 0.
pub async fn list_links_handler(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Vec<LinkResponse>>, AppError> {
    let Query(params) = params.map_err(|rejection| {
        AppError::bad_request(
            "Invalid pagination parameters",
            json!({ "reason": rejection.body_text() }),
        )
    })?;

    let (limit, skip) = params.limit_skip();

    let links = state.link_service.list_links(limit, skip).await?;

    Ok(Json(links.into_iter().map(LinkResponse::from).collect()))
}

/// Returns a single link.
///
/// # Endpoint
///
/// `GET /links/{code}?key=<AUTH_KEY>`
///
/// # Errors
///
/// Returns 404 Not Found if the code does not exist.
pub async fn get_link_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<LinkResponse>, AppError> {
    let link = state.link_service.get_link(&code).await?;

    Ok(Json(link.into()))
}

/// Permanently removes a link.
///
/// # Endpoint
///
/// `DELETE /links/{code}?key=<AUTH_KEY>`
///
/// # Response
///
/// ```json
/// { "deleted": 1 }
/// ```
///
/// The code is never reissued: the counter keeps moving forward.
///
/// # Errors
///
/// Returns 404 Not Found if the code does not exist.
pub async fn delete_link_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<DeleteResponse>, AppError> {
    let deleted = state.link_service.delete_link(&code).await?;

    if deleted == 0 {
        return Err(AppError::not_found(
            "Short link not found",
            json!({ "code": code }),
        ));
    }

    Ok(Json(DeleteResponse { deleted }))
}
