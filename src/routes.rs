//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST   /shorten`, `GET /links`, `GET|DELETE /links/{code}` - management API (`key` required)
//! - `GET    /{code}`      - Short link redirect (public)
//! - `GET    /health`      - Health check: store and counter (public)
//! - `GET    /`, `/404`    - Static pages from the public directory
//! - anything else         - Not-found page with status 404
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Authentication** - Shared key on management routes only
//! - **Path normalization** - Trailing slash handling

use std::path::Path;

use crate::api;
use crate::api::handlers::pages::Pages;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::{auth, tracing};
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `public_dir` - directory holding `index.html` and `404.html`
pub fn app_router(state: AppState, public_dir: impl AsRef<Path>) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(app_routes(state, public_dir))
}

/// All routes and per-route middleware, without path normalization.
pub fn app_routes(state: AppState, public_dir: impl AsRef<Path>) -> Router {
    let pages = Pages::new(public_dir);

    let api_router = api::routes::protected_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));

    Router::new()
        .merge(api_router)
        .route("/health", get(health_handler))
        .route("/{code}", get(redirect_handler))
        .route_service("/", pages.index())
        .route_service("/404", pages.not_found())
        .fallback_service(pages.fallback())
        .with_state(state)
        .layer(tracing::layer())
}
