//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod auth;
pub mod health;
pub mod users;

pub use auth::{login_handler, register_handler};
pub use health::health_handler;
pub use users::{
    delete_user_handler, find_user_by_id_handler, find_users_handler, update_user_handler,
};

use axum::{
    Json,
    extract::rejection::JsonRejection,
    response::{IntoResponse, Response},
};

use crate::api::validation::{RequestValidation, ValidationError, validate_id};
use crate::response::StdResponse;

/// Unwraps a JSON body and runs its validation rules.
///
/// On failure returns the ready-to-send envelope response: `4000` for an
/// undecodable body, `4001`/`4004` for the first failing rule.
pub(crate) fn bind_valid<T: RequestValidation>(
    payload: Result<Json<T>, JsonRejection>,
) -> Result<T, Response> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Bind request error");
        StdResponse::<()>::unexpected_request().into_response()
    })?;

    request.validate_request().map_err(reject)?;

    Ok(request)
}

/// Checks a path id, returning the `4004` envelope response if malformed.
pub(crate) fn valid_id(id: &str) -> Result<(), Response> {
    validate_id(id).map_err(reject)
}

fn reject(err: ValidationError) -> Response {
    StdResponse::<()>::from(err).into_response()
}
