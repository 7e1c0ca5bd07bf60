//! MongoDB implementation of the user repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mongodb::bson::{Document, doc, oid::ObjectId};
use mongodb::error::{Error as MongoError, ErrorKind, WriteFailure};
use mongodb::options::IndexOptions;
use mongodb::{Collection, Database, IndexModel};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{NewUser, User, UserPatch, UserProfile};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;

const DUPLICATE_KEY_CODE: i32 = 11000;

/// Stored shape of a user document.
#[derive(Debug, Serialize, Deserialize)]
struct UserDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    name: String,
    email: String,
    password: String,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    created_at: DateTime<Utc>,
}

impl From<UserDocument> for User {
    fn from(document: UserDocument) -> Self {
        Self {
            id: document.id.to_hex(),
            name: document.name,
            email: document.email,
            password_hash: document.password,
            created_at: document.created_at,
        }
    }
}

/// Projection of [`UserDocument`] without the password hash.
#[derive(Debug, Deserialize)]
struct UserProfileDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    name: String,
    email: String,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    created_at: DateTime<Utc>,
}

impl From<UserProfileDocument> for UserProfile {
    fn from(document: UserProfileDocument) -> Self {
        Self {
            id: document.id.to_hex(),
            name: document.name,
            email: document.email,
            created_at: document.created_at,
        }
    }
}

/// MongoDB repository for user accounts.
///
/// Email uniqueness is enforced by a unique index, created by
/// [`MongoUserRepository::ensure_indexes`].
pub struct MongoUserRepository {
    database: Database,
    users: Collection<UserDocument>,
    profiles: Collection<UserProfileDocument>,
}

impl MongoUserRepository {
    /// Creates a repository over `collection` in `database`.
    pub fn new(database: &Database, collection: &str) -> Self {
        let users = database.collection::<UserDocument>(collection);
        let profiles = users.clone_with_type::<UserProfileDocument>();

        Self {
            database: database.clone(),
            users,
            profiles,
        }
    }

    /// Creates the unique index on `email`. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] if index creation fails, for example
    /// because existing documents already share an email.
    pub async fn ensure_indexes(&self) -> Result<(), AppError> {
        let index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("email_unique".to_string())
                    .build(),
            )
            .build();

        self.users.create_index(index).await?;
        Ok(())
    }
}

fn profile_projection() -> Document {
    doc! { "name": 1, "email": 1, "created_at": 1 }
}

fn parse_object_id(id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id).map_err(|_| AppError::InvalidId(id.to_string()))
}

/// Returns true if the error is a unique index violation.
fn is_duplicate_key(err: &MongoError) -> bool {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => {
            write_error.code == DUPLICATE_KEY_CODE
        }
        ErrorKind::Command(command_error) => command_error.code == DUPLICATE_KEY_CODE,
        _ => false,
    }
}

fn map_write_error(err: MongoError) -> AppError {
    if is_duplicate_key(&err) {
        AppError::EmailAlreadyExists
    } else {
        AppError::Database(err)
    }
}

fn patch_document(patch: &UserPatch) -> Document {
    let mut set = Document::new();
    if let Some(name) = &patch.name {
        set.insert("name", name.as_str());
    }
    if let Some(email) = &patch.email {
        set.insert("email", email.as_str());
    }
    set
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<String, AppError> {
        let document = UserDocument {
            id: ObjectId::new(),
            name: new_user.name,
            email: new_user.email,
            password: new_user.password_hash,
            created_at: Utc::now(),
        };
        let id = document.id.to_hex();

        self.users
            .insert_one(document)
            .await
            .map_err(map_write_error)?;

        Ok(id)
    }

    async fn find_by_email(&self, email: &str) -> Result<User, AppError> {
        self.users
            .find_one(doc! { "email": email })
            .await?
            .map(User::from)
            .ok_or(AppError::UserOrPasswordIsWrong)
    }

    async fn find_by_id(&self, id: &str) -> Result<UserProfile, AppError> {
        let object_id = parse_object_id(id)?;

        self.profiles
            .find_one(doc! { "_id": object_id })
            .projection(profile_projection())
            .await?
            .map(UserProfile::from)
            .ok_or(AppError::UserNotFound)
    }

    async fn find_all(&self) -> Result<Vec<UserProfile>, AppError> {
        let mut cursor = self
            .profiles
            .find(doc! {})
            .projection(profile_projection())
            .sort(doc! { "created_at": 1 })
            .await?;

        let mut users = Vec::new();
        while cursor.advance().await? {
            users.push(UserProfile::from(cursor.deserialize_current()?));
        }

        Ok(users)
    }

    async fn update(&self, id: &str, patch: UserPatch) -> Result<u64, AppError> {
        let object_id = parse_object_id(id)?;
        let filter = doc! { "_id": object_id };

        if patch.is_empty() {
            return Ok(self.users.count_documents(filter).await?);
        }

        let result = self
            .users
            .update_one(filter, doc! { "$set": patch_document(&patch) })
            .await
            .map_err(map_write_error)?;

        Ok(result.matched_count)
    }

    async fn delete(&self, id: &str) -> Result<u64, AppError> {
        let object_id = parse_object_id(id)?;

        let result = self.users.delete_one(doc! { "_id": object_id }).await?;

        Ok(result.deleted_count)
    }

    async fn count(&self) -> Result<u64, AppError> {
        Ok(self.users.count_documents(doc! {}).await?)
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.database.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}
