//! Session token authentication middleware.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;
use axum_extra::extract::CookieJar;

use crate::{error::AppError, state::AppState};

/// Name of the cookie carrying the session token.
pub const TOKEN_COOKIE: &str = "token";

/// Authenticates REST requests by session token.
///
/// # Token Sources
///
/// 1. Cookie `token`, if the request carries one (even if empty)
/// 2. Otherwise the `Authorization` header:
///
/// ```text
/// Authorization: Bearer <token>
/// ```
///
/// On success the verified [`Claims`](crate::application::services::Claims)
/// are inserted into the request extensions.
///
/// # Errors
///
/// Returns `401` with the `4006` envelope if no token is present, or the
/// token is malformed, expired, or not signed with the service secret
/// using HS256.
///
/// # Example
///
/// ```rust,ignore
/// use axum::{Router, routing::get, middleware};
/// use crate::api::middleware::auth;
///
/// let protected = Router::new()
///     .route("/users", get(find_users_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let jar = CookieJar::from_headers(&parts.headers);
    let token = match jar.get(TOKEN_COOKIE) {
        Some(cookie) => cookie.value().to_string(),
        None => {
            let AuthBearer(token) = AuthBearer::from_request_parts(&mut parts, &())
                .await
                .map_err(|_| AppError::Unauthorized("missing session token".to_string()))?;
            token
        }
    };

    let mut req = Request::from_parts(parts, body);
    authorize(&st, &token, &mut req)?;

    Ok(next.run(req).await)
}

/// Authenticates RPC calls by the `authorization` metadata.
///
/// The scheme is matched case-insensitively and cookies are ignored.
///
/// # Errors
///
/// Same as [`layer`].
pub async fn rpc_layer(
    State(st): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_from_metadata(req.headers())
        .ok_or_else(|| AppError::Unauthorized("authorization token required".to_string()))?;

    authorize(&st, &token, &mut req)?;

    Ok(next.run(req).await)
}

fn authorize(st: &AppState, token: &str, req: &mut Request) -> Result<(), AppError> {
    if token.is_empty() {
        return Err(AppError::Unauthorized("empty session token".to_string()));
    }

    let claims = st.token_service.verify(token).inspect_err(|e| {
        tracing::debug!(error = %e, "Rejected session token");
    })?;

    req.extensions_mut().insert(claims);
    Ok(())
}

/// Extracts `<token>` from `authorization: <scheme> <token>` when the
/// scheme is `bearer` in any case.
fn bearer_from_metadata(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;

    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then(|| token.to_string())
}
