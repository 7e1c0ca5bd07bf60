//! Top-level REST router.
//!
//! # Route Structure
//!
//! - `POST /login`, `POST /register` - Public
//! - `GET  /health`                  - Health check (public)
//! - `/users/*`                      - Session token required
//!
//! # Middleware
//!
//! - **Request id** - `x-request-id` assigned if absent and echoed back
//! - **Tracing** - Structured request/response logging
//! - **Authentication** - Session token from cookie or bearer header
//! - **Panic recovery** - A panicking handler answers with the `5000` envelope
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{auth, recover, tracing};
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the REST router with all routes and middleware.
pub fn rest_routes(state: AppState) -> Router {
    let protected = api::routes::protected_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));

    Router::new()
        .route("/health", get(health_handler))
        .merge(api::routes::public_routes())
        .merge(protected)
        .with_state(state)
        .layer(recover::layer())
        .layer(tracing::layer())
        .layer(tracing::propagate_request_id_layer())
        .layer(tracing::set_request_id_layer())
}

/// [`rest_routes`] with trailing slashes trimmed before routing.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(rest_routes(state))
}
