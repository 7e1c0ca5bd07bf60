#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use chrono::Utc;
use mongodb::bson::oid::ObjectId;
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use user_management::application::services::{TokenService, UserService, UserUsecase};
use user_management::domain::entities::{NewUser, User, UserPatch, UserProfile};
use user_management::domain::repositories::UserRepository;
use user_management::error::AppError;
use user_management::routes::rest_routes;
use user_management::rpc::rpc_router;
use user_management::state::AppState;

pub const TEST_SECRET: &str = "test-jwt-secret";
pub const TEST_COST: u32 = 4;
pub const UNKNOWN_ID: &str = "60d5ec49f1f1c939b4f2f0c2";

/// Store-backed user repository double.
///
/// Mirrors the MongoDB repository's observable behavior: hex ids, unique
/// emails, insertion-ordered listing.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn parse_id(id: &str) -> Result<(), AppError> {
        ObjectId::parse_str(id)
            .map(|_| ())
            .map_err(|_| AppError::InvalidId(id.to_string()))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<String, AppError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == new_user.email) {
            return Err(AppError::EmailAlreadyExists);
        }

        let id = ObjectId::new().to_hex();
        users.push(User {
            id: id.clone(),
            name: new_user.name,
            email: new_user.email,
            password_hash: new_user.password_hash,
            created_at: Utc::now(),
        });
        Ok(id)
    }

    async fn find_by_email(&self, email: &str) -> Result<User, AppError> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned()
            .ok_or(AppError::UserOrPasswordIsWrong)
    }

    async fn find_by_id(&self, id: &str) -> Result<UserProfile, AppError> {
        Self::parse_id(id)?;
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .map(UserProfile::from)
            .ok_or(AppError::UserNotFound)
    }

    async fn find_all(&self) -> Result<Vec<UserProfile>, AppError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .cloned()
            .map(UserProfile::from)
            .collect())
    }

    async fn update(&self, id: &str, patch: UserPatch) -> Result<u64, AppError> {
        Self::parse_id(id)?;
        let mut users = self.users.lock().unwrap();

        if let Some(email) = &patch.email
            && users.iter().any(|u| u.id != id && &u.email == email)
        {
            return Err(AppError::EmailAlreadyExists);
        }

        let Some(user) = users.iter_mut().find(|u| u.id == id) else {
            return Ok(0);
        };
        if let Some(name) = patch.name {
            user.name = name;
        }
        if let Some(email) = patch.email {
            user.email = email;
        }
        Ok(1)
    }

    async fn delete(&self, id: &str) -> Result<u64, AppError> {
        Self::parse_id(id)?;
        let mut users = self.users.lock().unwrap();
        let before = users.len();
        users.retain(|u| u.id != id);
        Ok((before - users.len()) as u64)
    }

    async fn count(&self) -> Result<u64, AppError> {
        Ok(self.users.lock().unwrap().len() as u64)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

/// Repository whose store is always unreachable.
pub struct FailingUserRepository;

fn unavailable() -> AppError {
    AppError::internal("store unavailable")
}

#[async_trait]
impl UserRepository for FailingUserRepository {
    async fn create(&self, _new_user: NewUser) -> Result<String, AppError> {
        Err(unavailable())
    }

    async fn find_by_email(&self, _email: &str) -> Result<User, AppError> {
        Err(unavailable())
    }

    async fn find_by_id(&self, _id: &str) -> Result<UserProfile, AppError> {
        Err(unavailable())
    }

    async fn find_all(&self) -> Result<Vec<UserProfile>, AppError> {
        Err(unavailable())
    }

    async fn update(&self, _id: &str, _patch: UserPatch) -> Result<u64, AppError> {
        Err(unavailable())
    }

    async fn delete(&self, _id: &str) -> Result<u64, AppError> {
        Err(unavailable())
    }

    async fn count(&self) -> Result<u64, AppError> {
        Err(unavailable())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Err(unavailable())
    }
}

/// Repository whose every call panics, standing in for a crashing driver.
pub struct PanickingUserRepository;

#[async_trait]
impl UserRepository for PanickingUserRepository {
    async fn create(&self, _new_user: NewUser) -> Result<String, AppError> {
        panic!("driver crashed in create")
    }

    async fn find_by_email(&self, _email: &str) -> Result<User, AppError> {
        panic!("driver crashed in find_by_email")
    }

    async fn find_by_id(&self, _id: &str) -> Result<UserProfile, AppError> {
        panic!("driver crashed in find_by_id")
    }

    async fn find_all(&self) -> Result<Vec<UserProfile>, AppError> {
        panic!("driver crashed in find_all")
    }

    async fn update(&self, _id: &str, _patch: UserPatch) -> Result<u64, AppError> {
        panic!("driver crashed in update")
    }

    async fn delete(&self, _id: &str) -> Result<u64, AppError> {
        panic!("driver crashed in delete")
    }

    async fn count(&self) -> Result<u64, AppError> {
        panic!("driver crashed in count")
    }

    async fn ping(&self) -> Result<(), AppError> {
        panic!("driver crashed in ping")
    }
}

pub fn token_service() -> Arc<TokenService> {
    Arc::new(TokenService::new(TEST_SECRET, Duration::from_secs(3600)).unwrap())
}

pub fn create_test_state<R: UserRepository + 'static>(repository: R) -> AppState {
    let tokens = token_service();
    let user_service: Arc<dyn UserUsecase> =
        Arc::new(UserService::new(Arc::new(repository), tokens.clone(), TEST_COST));
    AppState::new(user_service, tokens)
}

pub fn rest_server(state: AppState) -> TestServer {
    TestServer::new(rest_routes(state)).unwrap()
}

pub fn rpc_server(state: AppState) -> TestServer {
    TestServer::new(rpc_router(state)).unwrap()
}

/// A valid session token for `email`, issued with the test secret.
pub fn token_for(email: &str) -> String {
    token_service().issue(email).unwrap().token
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

pub async fn register(server: &TestServer, name: &str, email: &str, password: &str) -> String {
    let response = server
        .post("/register")
        .json(&json!({ "name": name, "email": email, "password": password }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    body["data"]["id"].as_str().unwrap().to_string()
}

pub async fn login(server: &TestServer, email: &str, password: &str) -> String {
    let response = server
        .post("/login")
        .json(&json!({ "email": email, "password": password }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    body["data"]["token"].as_str().unwrap().to_string()
}
