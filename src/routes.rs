//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST /register`, `POST /login`, `GET /health` - public
//! - `POST /logout`, `/employees`, `/employees/{id}` - Bearer token required
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Authentication** - Bearer token resolved to the calling user
//! - **Path normalization** - Trailing slash handling

use crate::api::middleware::{auth, tracing};
use crate::api::routes::{protected_routes, public_routes};
use crate::state::AppState;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Builds the router with all routes and middleware except path normalization.
pub fn router(state: AppState) -> Router {
    let protected =
        protected_routes().route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));

    Router::new()
        .merge(public_routes())
        .merge(protected)
        .with_state(state)
        .layer(tracing::layer())
}

/// Constructs the application service: [`router`] wrapped so that
/// `/employees/` and `/employees` resolve to the same route.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}
