//! Uniform `{code, message, data}` response envelope.
//!
//! Every outcome the service can report, on either transport, is one of a
//! fixed set of [`ResponseCode`]s. The code alone determines the message
//! template and the HTTP status used by the REST front end.
//!
//! | Code   | Message                          | HTTP |
//! |--------|----------------------------------|------|
//! | `0000` | Success                          | 200  |
//! | `4000` | Unexpected request               | 400  |
//! | `4001` | `{field}` is required            | 400  |
//! | `4002` | An email has already been used   | 400  |
//! | `4003` | Login failed                     | 400  |
//! | `4004` | `{field}` is invalid data        | 400  |
//! | `4005` | User not found                   | 404  |
//! | `4006` | Invalid authentication token     | 401  |
//! | `5000` | Internal server error            | 500  |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Serialize, Serializer};

/// Stable outcome codes shared by the REST and RPC front ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseCode {
    Success,
    UnexpectedRequest,
    MandatoryMissing,
    DuplicatedRegistration,
    LoginFailed,
    InvalidData,
    UserNotFound,
    InvalidAuthToken,
    InternalServerError,
}

impl ResponseCode {
    /// Wire representation of the code.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "0000",
            Self::UnexpectedRequest => "4000",
            Self::MandatoryMissing => "4001",
            Self::DuplicatedRegistration => "4002",
            Self::LoginFailed => "4003",
            Self::InvalidData => "4004",
            Self::UserNotFound => "4005",
            Self::InvalidAuthToken => "4006",
            Self::InternalServerError => "5000",
        }
    }

    /// HTTP status the REST front end answers with for this code.
    pub const fn http_status(self) -> StatusCode {
        match self {
            Self::Success => StatusCode::OK,
            Self::UnexpectedRequest
            | Self::MandatoryMissing
            | Self::DuplicatedRegistration
            | Self::LoginFailed
            | Self::InvalidData => StatusCode::BAD_REQUEST,
            Self::UserNotFound => StatusCode::NOT_FOUND,
            Self::InvalidAuthToken => StatusCode::UNAUTHORIZED,
            Self::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message for codes that take no parameter.
    const fn fixed_message(self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::UnexpectedRequest => "Unexpected request",
            Self::DuplicatedRegistration => "An email has already been used",
            Self::LoginFailed => "Login failed",
            Self::UserNotFound => "User not found",
            Self::InvalidAuthToken => "Invalid authentication token",
            Self::InternalServerError => "Internal server error",
            // Parameterized; built by the constructors below.
            Self::MandatoryMissing => "is required",
            Self::InvalidData => "is invalid data",
        }
    }
}

impl Serialize for ResponseCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Response envelope carried by every REST and RPC reply.
///
/// `data` is only ever populated on [`ResponseCode::Success`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StdResponse<T = ()> {
    pub code: ResponseCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> StdResponse<T> {
    fn fixed(code: ResponseCode) -> Self {
        Self {
            code,
            message: code.fixed_message().to_string(),
            data: None,
        }
    }

    fn with_field(code: ResponseCode, field: &str) -> Self {
        Self {
            code,
            message: format!("{} {}", field, code.fixed_message()),
            data: None,
        }
    }

    pub fn success() -> Self {
        Self::fixed(ResponseCode::Success)
    }

    pub fn success_with(data: T) -> Self {
        Self {
            data: Some(data),
            ..Self::fixed(ResponseCode::Success)
        }
    }

    pub fn unexpected_request() -> Self {
        Self::fixed(ResponseCode::UnexpectedRequest)
    }

    /// `"{field} is required"`
    pub fn mandatory_missing(field: &str) -> Self {
        Self::with_field(ResponseCode::MandatoryMissing, field)
    }

    pub fn duplicated_registration() -> Self {
        Self::fixed(ResponseCode::DuplicatedRegistration)
    }

    pub fn login_failed() -> Self {
        Self::fixed(ResponseCode::LoginFailed)
    }

    /// `"{field} is invalid data"`
    pub fn invalid_data(field: &str) -> Self {
        Self::with_field(ResponseCode::InvalidData, field)
    }

    pub fn user_not_found() -> Self {
        Self::fixed(ResponseCode::UserNotFound)
    }

    pub fn unauthorized() -> Self {
        Self::fixed(ResponseCode::InvalidAuthToken)
    }

    pub fn internal_server_error() -> Self {
        Self::fixed(ResponseCode::InternalServerError)
    }

    pub fn is_success(&self) -> bool {
        self.code == ResponseCode::Success
    }

    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    /// Re-types the envelope, dropping any payload.
    ///
    /// Used to forward failure envelopes between operations whose success
    /// payloads differ.
    pub fn retype<U>(self) -> StdResponse<U> {
        StdResponse {
            code: self.code,
            message: self.message,
            data: None,
        }
    }
}

impl<T: Serialize> IntoResponse for StdResponse<T> {
    fn into_response(self) -> Response {
        (self.http_status(), Json(self)).into_response()
    }
}
