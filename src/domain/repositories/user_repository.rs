//! Repository trait for user account data access.

use crate::domain::entities::{NewUser, User, UserPatch, UserProfile};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for the user collection.
///
/// Identifiers are the hex form of the store-native object id.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::MongoUserRepository`] - MongoDB implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts a user, stamping `created_at`, and returns the generated id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::EmailAlreadyExists`] if the email is taken.
    /// Returns [`AppError::Database`] on store errors.
    async fn create(&self, new_user: NewUser) -> Result<String, AppError>;

    /// Finds a user, password hash included, by email.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::UserOrPasswordIsWrong`] if no user has this email,
    /// so callers cannot tell an unknown account from a wrong password.
    async fn find_by_email(&self, email: &str) -> Result<User, AppError>;

    /// Finds a user profile by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidId`] if `id` is malformed.
    /// Returns [`AppError::UserNotFound`] if no user has this id.
    async fn find_by_id(&self, id: &str) -> Result<UserProfile, AppError>;

    /// Lists all user profiles ordered by creation time, oldest first.
    async fn find_all(&self) -> Result<Vec<UserProfile>, AppError>;

    /// Applies a partial update and returns the number of matched users.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::EmailAlreadyExists`] if the new email is taken.
    /// Returns [`AppError::InvalidId`] if `id` is malformed.
    async fn update(&self, id: &str, patch: UserPatch) -> Result<u64, AppError>;

    /// Deletes a user and returns the number of deleted users.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidId`] if `id` is malformed.
    async fn delete(&self, id: &str) -> Result<u64, AppError>;

    /// Counts all users.
    async fn count(&self) -> Result<u64, AppError>;

    /// Round-trips to the store to check connectivity.
    async fn ping(&self) -> Result<(), AppError>;
}
