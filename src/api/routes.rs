//! API route configuration.
//!
//! Every route here requires the shared key via
//! [`crate::api::middleware::auth`].

use crate::api::handlers::{
    delete_link_handler, get_link_handler, list_links_handler, shorten_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Management routes, protected by the `key` query parameter.
///
/// # Endpoints
///
/// - `POST   /shorten`        - Create a short link
/// - `GET    /links`          - List links in creation order (`s` skip, `l` limit)
/// - `GET    /links/{code}`   - Show one link
/// - `DELETE /links/{code}`   - Remove a link
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/links", get(list_links_handler))
        .route(
            "/links/{code}",
            get(get_link_handler).delete(delete_link_handler),
        )
}
