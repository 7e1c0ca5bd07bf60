//! User account usecases: registration, login, lookup, update, deletion.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::task::{self, JoinError};
use tracing::instrument;

use crate::api::dto::user::{
    CreateUserRequest, CreateUserResponse, SignInRequest, SignInResponse, UpdateUserRequest,
    UserResponse,
};
use crate::application::services::password::{hash_password, verify_password};
use crate::application::services::token_service::TokenService;
use crate::domain::entities::{NewUser, UserPatch};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;
use crate::response::StdResponse;

/// Business operations shared by the REST and RPC front ends.
///
/// Expected business outcomes (duplicate email, unknown user, failed login)
/// come back as `Ok` with a failure envelope. `Err` is reserved for
/// infrastructure failures, which transports report as internal errors.
#[async_trait]
pub trait UserUsecase: Send + Sync {
    async fn create_user(
        &self,
        request: CreateUserRequest,
    ) -> Result<StdResponse<CreateUserResponse>, AppError>;

    async fn login(&self, request: SignInRequest) -> Result<StdResponse<SignInResponse>, AppError>;

    async fn find_users(&self) -> Result<StdResponse<Vec<UserResponse>>, AppError>;

    async fn find_user_by_id(&self, id: &str) -> Result<StdResponse<UserResponse>, AppError>;

    async fn update_user(
        &self,
        id: &str,
        request: UpdateUserRequest,
    ) -> Result<StdResponse, AppError>;

    async fn delete_user(&self, id: &str) -> Result<StdResponse, AppError>;

    /// Checks that the backing store is reachable.
    async fn health(&self) -> Result<(), AppError>;
}

/// [`UserUsecase`] implementation over a [`UserRepository`].
///
/// bcrypt work runs on the blocking thread pool.
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
    tokens: Arc<TokenService>,
    bcrypt_cost: u32,
}

impl<R: UserRepository> UserService<R> {
    /// Creates a new user service.
    ///
    /// # Arguments
    ///
    /// - `repository` - user store
    /// - `tokens` - session token issuer
    /// - `bcrypt_cost` - work factor for password hashing
    pub fn new(repository: Arc<R>, tokens: Arc<TokenService>, bcrypt_cost: u32) -> Self {
        Self {
            repository,
            tokens,
            bcrypt_cost,
        }
    }
}

#[async_trait]
impl<R: UserRepository> UserUsecase for UserService<R> {
    #[instrument(skip_all, fields(email = %request.email))]
    async fn create_user(
        &self,
        request: CreateUserRequest,
    ) -> Result<StdResponse<CreateUserResponse>, AppError> {
        let (password, cost) = (request.password, self.bcrypt_cost);
        let password_hash = task::spawn_blocking(move || hash_password(&password, cost))
            .await
            .map_err(blocking_task_failed)??;

        let new_user = NewUser {
            name: request.name,
            email: request.email,
            password_hash,
        };

        match self.repository.create(new_user).await {
            Ok(id) => {
                tracing::info!(user_id = %id, "User registered");
                Ok(StdResponse::success_with(CreateUserResponse { id }))
            }
            Err(AppError::EmailAlreadyExists) => Ok(StdResponse::duplicated_registration()),
            Err(e) => Err(e),
        }
    }

    #[instrument(skip_all, fields(email = %request.email))]
    async fn login(&self, request: SignInRequest) -> Result<StdResponse<SignInResponse>, AppError> {
        let user = match self.repository.find_by_email(&request.email).await {
            Ok(user) => user,
            Err(AppError::UserOrPasswordIsWrong) => return Ok(StdResponse::login_failed()),
            Err(e) => return Err(e),
        };

        let (password, hash) = (request.password, user.password_hash);
        let matches = task::spawn_blocking(move || verify_password(&password, &hash))
            .await
            .map_err(blocking_task_failed)?;

        if !matches {
            return Ok(StdResponse::login_failed());
        }

        let issued = self.tokens.issue(&user.email)?;

        Ok(StdResponse::success_with(SignInResponse {
            token: issued.token,
            expires_at: issued.expires_at,
        }))
    }

    #[instrument(skip_all)]
    async fn find_users(&self) -> Result<StdResponse<Vec<UserResponse>>, AppError> {
        let users = self.repository.find_all().await?;

        Ok(StdResponse::success_with(
            users.into_iter().map(UserResponse::from).collect(),
        ))
    }

    #[instrument(skip(self))]
    async fn find_user_by_id(&self, id: &str) -> Result<StdResponse<UserResponse>, AppError> {
        match self.repository.find_by_id(id).await {
            Ok(profile) => Ok(StdResponse::success_with(profile.into())),
            Err(AppError::UserNotFound) => Ok(StdResponse::user_not_found()),
            Err(e @ AppError::InvalidId(_)) => Ok(e.envelope().retype()),
            Err(e) => Err(e),
        }
    }

    #[instrument(skip(self, request))]
    async fn update_user(
        &self,
        id: &str,
        request: UpdateUserRequest,
    ) -> Result<StdResponse, AppError> {
        let patch = UserPatch::from_fields(&request.name, &request.email);

        match self.repository.update(id, patch).await {
            Ok(0) => Ok(StdResponse::user_not_found()),
            Ok(_) => Ok(StdResponse::success()),
            Err(AppError::EmailAlreadyExists) => Ok(StdResponse::duplicated_registration()),
            Err(e @ AppError::InvalidId(_)) => Ok(e.envelope()),
            Err(e) => Err(e),
        }
    }

    #[instrument(skip(self))]
    async fn delete_user(&self, id: &str) -> Result<StdResponse, AppError> {
        match self.repository.delete(id).await {
            Ok(0) => Ok(StdResponse::user_not_found()),
            Ok(_) => {
                tracing::info!(user_id = %id, "User deleted");
                Ok(StdResponse::success())
            }
            Err(e @ AppError::InvalidId(_)) => Ok(e.envelope()),
            Err(e) => Err(e),
        }
    }

    async fn health(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }
}

fn blocking_task_failed(err: JoinError) -> AppError {
    AppError::internal(format!("password task failed: {}", err))
}
