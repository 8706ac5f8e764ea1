//! Shared-key authentication middleware.

use axum::{
    extract::{Query, Request, State},
    middleware::Next,
    response::Response,
};
use serde::Deserialize;

use crate::{error::AppError, state::AppState};

#[derive(Debug, Deserialize)]
struct KeyParam {
    key: Option<String>,
}

/// Authenticates requests using the `key` query parameter.
///
/// # Format
///
/// ```text
/// GET /links?key=<AUTH_KEY>&s=0&l=20
/// ```
///
/// Other query parameters are left for the handler.
///
/// # Errors
///
/// Returns `401 Unauthorized` if the key is missing, malformed or wrong. The
/// handler is not called in that case.
///
/// # Example
///
/// ```rust,ignore
/// use axum::{Router, routing::get, middleware};
/// use crate::api::middleware::auth;
///
/// let protected = Router::new()
///     .route("/links", get(list_links_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let key = Query::<KeyParam>::try_from_uri(req.uri())
        .ok()
        .and_then(|Query(p)| p.key);

    st.auth_service.authenticate(key.as_deref())?;

    Ok(next.run(req).await)
}
