//! Application error type and its mapping onto response envelopes.
//!
//! Business conditions raised by the repository (duplicate email, unknown
//! user) have dedicated variants so the usecase layer can turn them into
//! envelopes. Everything else is an infrastructure failure and is reported to
//! clients as [`ResponseCode::InternalServerError`](crate::response::ResponseCode).

use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::response::StdResponse;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Email already exists")]
    EmailAlreadyExists,

    /// Unknown email at login. Shares its envelope with a wrong password.
    #[error("User or password is wrong")]
    UserOrPasswordIsWrong,

    #[error("User not found")]
    UserNotFound,

    #[error("Invalid id: {0}")]
    InvalidId(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("Password hashing error: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),

    #[error("Token signing error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Returns true for failures that are not a client-visible business outcome.
    pub fn is_infrastructure(&self) -> bool {
        matches!(
            self,
            Self::Database(_) | Self::PasswordHash(_) | Self::Token(_) | Self::Internal(_)
        )
    }

    /// Envelope reported to clients for this error.
    pub fn envelope(&self) -> StdResponse {
        match self {
            Self::EmailAlreadyExists => StdResponse::duplicated_registration(),
            Self::UserOrPasswordIsWrong => StdResponse::login_failed(),
            Self::UserNotFound => StdResponse::user_not_found(),
            Self::InvalidId(_) => StdResponse::invalid_data("id"),
            Self::Unauthorized(_) => StdResponse::unauthorized(),
            Self::Database(_) | Self::PasswordHash(_) | Self::Token(_) | Self::Internal(_) => {
                StdResponse::internal_server_error()
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.is_infrastructure() {
            tracing::error!(error = %self, "Request failed");
        }
        self.envelope().into_response()
    }
}
