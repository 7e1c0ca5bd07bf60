//! Handlers for the protected user endpoints.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    response::{IntoResponse, Response},
};

use crate::api::dto::user::UpdateUserRequest;
use crate::api::handlers::{bind_valid, valid_id};
use crate::error::AppError;
use crate::state::AppState;

/// Lists all users, oldest first.
///
/// # Endpoint
///
/// `GET /users`
///
/// # Response
///
/// ```json
/// {
///   "code": "0000",
///   "message": "Success",
///   "data": [
///     { "id": "60d5ec49f1f1c939b4f2f0c2", "name": "John Doe", "email": "john.doe@example.com", "created_at": "2025-01-01T12:00:00Z" }
///   ]
/// }
/// ```
pub async fn find_users_handler(State(state): State<AppState>) -> Result<Response, AppError> {
    Ok(state.user_service.find_users().await?.into_response())
}

/// Returns one user.
///
/// # Endpoint
///
/// `GET /users/{id}`
///
/// # Errors
///
/// - `4004` / 400 if `id` is not a 24-hex-character id
/// - `4005` / 404 if no user has this id
pub async fn find_user_by_id_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    if let Err(rejection) = valid_id(&id) {
        return Ok(rejection);
    }

    Ok(state
        .user_service
        .find_user_by_id(&id)
        .await?
        .into_response())
}

/// Partially updates a user. Blank fields are left unchanged.
///
/// # Endpoint
///
/// `PUT /users/{id}`
///
/// # Request Body
///
/// ```json
/// { "name": "Jane Doe" }
/// ```
///
/// # Errors
///
/// - `4004` / 400 if `id` or `email` is malformed
/// - `4001` / 400 if neither `name` nor `email` is given
/// - `4002` / 400 if the new email is taken
/// - `4005` / 404 if no user has this id
pub async fn update_user_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    if let Err(rejection) = valid_id(&id) {
        return Ok(rejection);
    }

    let request = match bind_valid(payload) {
        Ok(request) => request,
        Err(rejection) => return Ok(rejection),
    };

    Ok(state
        .user_service
        .update_user(&id, request)
        .await?
        .into_response())
}

/// Deletes a user.
///
/// # Endpoint
///
/// `DELETE /users/{id}`
///
/// # Errors
///
/// - `4004` / 400 if `id` is malformed
/// - `4005` / 404 if no user has this id
pub async fn delete_user_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    if let Err(rejection) = valid_id(&id) {
        return Ok(rejection);
    }

    Ok(state.user_service.delete_user(&id).await?.into_response())
}
