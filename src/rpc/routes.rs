//! RPC route configuration.

use axum::{Router, middleware, routing::post};

use crate::api::middleware::{auth, recover, tracing};
use crate::rpc::handlers::{create_user, get_user};
use crate::state::AppState;

/// Fully qualified service name; method paths are `/{SERVICE}/{Method}`.
pub const SERVICE: &str = "user.v1.UserService";

/// Builds the RPC router. Every method requires a session token.
///
/// # Methods
///
/// - `POST /user.v1.UserService/CreateUser`
/// - `POST /user.v1.UserService/GetUser`
pub fn rpc_router(state: AppState) -> Router {
    Router::new()
        .route(&format!("/{}/CreateUser", SERVICE), post(create_user))
        .route(&format!("/{}/GetUser", SERVICE), post(get_user))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::rpc_layer,
        ))
        .with_state(state)
        .layer(recover::rpc_layer())
        .layer(tracing::layer())
        .layer(tracing::propagate_request_id_layer())
        .layer(tracing::set_request_id_layer())
}
