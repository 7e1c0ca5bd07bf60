//! Handlers for registration and login.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::{IntoResponse, Response},
};
use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};
use chrono::{DateTime, Utc};
use time::OffsetDateTime;

use crate::api::dto::user::{CreateUserRequest, SignInRequest};
use crate::api::handlers::bind_valid;
use crate::api::middleware::auth::TOKEN_COOKIE;
use crate::error::AppError;
use crate::state::AppState;

/// Registers a new user account.
///
/// # Endpoint
///
/// `POST /register`
///
/// # Request Body
///
/// ```json
/// { "name": "John Doe", "email": "john.doe@example.com", "password": "password123" }
/// ```
///
/// # Response
///
/// ```json
/// { "code": "0000", "message": "Success", "data": { "id": "60d5ec49f1f1c939b4f2f0c2" } }
/// ```
///
/// # Errors
///
/// - `4000` / 400 if the body is not valid JSON
/// - `4001` / `4004` / 400 on the first failing field rule
/// - `4002` / 400 if the email is already registered
/// - `5000` / 500 on store failure
pub async fn register_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let request = match bind_valid(payload) {
        Ok(request) => request,
        Err(rejection) => return Ok(rejection),
    };

    Ok(state
        .user_service
        .create_user(request)
        .await?
        .into_response())
}

/// Exchanges credentials for a session token.
///
/// # Endpoint
///
/// `POST /login`
///
/// # Response
///
/// ```json
/// { "code": "0000", "message": "Success", "data": { "token": "eyJ...", "expire_at": "2025-01-01T12:00:00Z" } }
/// ```
///
/// The token is also set as an `HttpOnly`, `Secure`, `SameSite=Strict`
/// cookie named `token`, expiring with the token.
///
/// # Errors
///
/// - `4003` / 400 for an unknown email or a wrong password, indistinguishably
pub async fn login_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: Result<Json<SignInRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let request = match bind_valid(payload) {
        Ok(request) => request,
        Err(rejection) => return Ok(rejection),
    };

    let resp = state.user_service.login(request).await?;

    let cookie = resp
        .data
        .as_ref()
        .filter(|_| resp.is_success())
        .map(|data| session_cookie(data.token.clone(), data.expires_at))
        .transpose()?;

    match cookie {
        Some(cookie) => Ok((jar.add(cookie), resp).into_response()),
        None => Ok(resp.into_response()),
    }
}

fn session_cookie(token: String, expires_at: DateTime<Utc>) -> Result<Cookie<'static>, AppError> {
    let expires = OffsetDateTime::from_unix_timestamp(expires_at.timestamp())
        .map_err(|e| AppError::internal(format!("cookie expiry out of range: {}", e)))?;

    Ok(Cookie::build((TOKEN_COOKIE, token))
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Strict)
        .path("/")
        .expires(expires)
        .build())
}
