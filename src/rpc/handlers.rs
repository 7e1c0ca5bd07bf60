//! RPC method handlers.
//!
//! Every outcome, including decode errors and infrastructure failures, is
//! answered with HTTP 200 and an envelope. Transport-level failures are left
//! to the auth layer.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};

use crate::api::validation::{RequestValidation, validate_id};
use crate::error::AppError;
use crate::response::StdResponse;
use crate::rpc::messages::{CreateUserRequest, CreateUserResponse, GetUserData, GetUserRequest};
use crate::state::AppState;

type Reply<T> = Json<StdResponse<T>>;

/// `user.v1.UserService/CreateUser`
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Reply<CreateUserResponse> {
    let request = match decode(payload) {
        Ok(request) => request,
        Err(resp) => return Json(resp),
    };

    if let Err(e) = request.validate_request() {
        return Json(e.into());
    }

    reply(state.user_service.create_user(request).await)
}

/// `user.v1.UserService/GetUser`
pub async fn get_user(
    State(state): State<AppState>,
    payload: Result<Json<GetUserRequest>, JsonRejection>,
) -> Reply<GetUserData> {
    let request = match decode(payload) {
        Ok(request) => request,
        Err(resp) => return Json(resp),
    };

    if let Err(e) = validate_id(&request.id) {
        return Json(e.into());
    }

    let result = state
        .user_service
        .find_user_by_id(&request.id)
        .await
        .map(|resp| StdResponse {
            code: resp.code,
            message: resp.message,
            data: resp.data.map(GetUserData::from),
        });

    reply(result)
}

fn decode<T, U>(payload: Result<Json<T>, JsonRejection>) -> Result<T, StdResponse<U>> {
    payload.map(|Json(request)| request).map_err(|rejection| {
        tracing::debug!(error = %rejection, "Bind request error");
        StdResponse::unexpected_request()
    })
}

fn reply<T>(result: Result<StdResponse<T>, AppError>) -> Reply<T> {
    match result {
        Ok(resp) => Json(resp),
        Err(e) => {
            tracing::error!(error = %e, "RPC call failed");
            Json(e.envelope().retype())
        }
    }
}
