//! DTOs for user account endpoints, shared by the REST and RPC front ends.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::UserProfile;

/// Request body for `POST /register` and the `CreateUser` RPC.
///
/// Missing fields bind as empty strings so validation can report them by name.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Request body for `POST /login`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

/// Request body for `PUT /users/{id}`. Blank fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct UpdateUserRequest {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateUserResponse {
    pub id: String,
}

/// Issued session token; also delivered as the `token` cookie.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignInResponse {
    pub token: String,
    #[serde(rename = "expire_at")]
    pub expires_at: DateTime<Utc>,
}

/// Public view of a user account.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<UserProfile> for UserResponse {
    fn from(profile: UserProfile) -> Self {
        Self {
            id: profile.id,
            name: profile.name,
            email: profile.email,
            created_at: profile.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_fields_bind_empty() {
        let req: CreateUserRequest = serde_json::from_value(json!({ "name": "Jane" })).unwrap();
        assert_eq!(req.name, "Jane");
        assert!(req.email.is_empty());
        assert!(req.password.is_empty());
    }

    #[test]
    fn test_sign_in_response_field_name() {
        let resp = SignInResponse {
            token: "t".to_string(),
            expires_at: DateTime::from_timestamp(0, 0).unwrap(),
        };
        let body = serde_json::to_value(resp).unwrap();
        assert_eq!(body["token"], "t");
        assert!(body.get("expire_at").is_some());
    }
}
