//! Message shapes of the `user.v1.UserService` RPC methods.
//!
//! `CreateUser` reuses [`CreateUserRequest`] and [`CreateUserResponse`].
//! Replies are always `{code, message, data?}` envelopes.

use serde::{Deserialize, Serialize};

use crate::api::dto::user::UserResponse;

pub use crate::api::dto::user::{CreateUserRequest, CreateUserResponse};

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GetUserRequest {
    pub id: String,
}

/// `GetUser` payload. Carries no timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetUserData {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl From<UserResponse> for GetUserData {
    fn from(user: UserResponse) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}
