//! REST route configuration.
//!
//! Protected routes require a session token via
//! [`crate::api::middleware::auth`].

use crate::api::handlers::{
    delete_user_handler, find_user_by_id_handler, find_users_handler, login_handler,
    register_handler, update_user_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Routes reachable without a session.
///
/// # Endpoints
///
/// - `POST /login`    - Exchange credentials for a session token
/// - `POST /register` - Create an account
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(login_handler))
        .route("/register", post(register_handler))
}

/// Routes that require a session token.
///
/// # Endpoints
///
/// - `GET    /users`      - List users
/// - `GET    /users/{id}` - Get one user
/// - `PUT    /users/{id}` - Partially update a user
/// - `DELETE /users/{id}` - Delete a user
pub fn protected_routes() -> Router<AppState> {
    Router::new().route("/users", get(find_users_handler)).route(
        "/users/{id}",
        get(find_user_by_id_handler)
            .put(update_user_handler)
            .delete(delete_user_handler),
    )
}
