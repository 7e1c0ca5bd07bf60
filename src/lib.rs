//! # User Management
//!
//! A user account service with REST and RPC front ends, built with Axum and
//! MongoDB.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - User entities, repository traits, background counter
//! - **Application Layer** ([`application`]) - Usecases, password hashing, session tokens
//! - **Infrastructure Layer** ([`infrastructure`]) - MongoDB persistence
//! - **API Layer** ([`api`]) - REST handlers, DTOs, validation, and middleware
//! - **RPC Layer** ([`rpc`]) - `user.v1.UserService` on its own listener
//!
//! Both front ends answer with the same `{code, message, data}` envelope
//! ([`response`]).
//!
//! ## Features
//!
//! - Registration and login with bcrypt-hashed passwords
//! - Stateless HS256 session tokens via cookie or bearer header
//! - Partial updates with unique email enforcement
//! - Request id tracing and graceful shutdown
//!
//! ## Quick Start
//!
//! ```bash
//! export HTTP_SERVER_PORT=8080
//! export GRPC_SERVER_PORT=9090
//! export MONGO_CONFIG_URI="mongodb://localhost:27017"
//! export MONGO_CONFIG_DATABASE="users-db"
//! export CRYPTO_JWT_KEY="change-me"
//! export CRYPTO_JWT_EXPIRE_DURATION="1h"
//!
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod response;
pub mod rpc;
pub mod state;

pub mod config;
pub mod server;
pub mod telemetry;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{TokenService, UserService, UserUsecase};
    pub use crate::domain::entities::{NewUser, User, UserPatch, UserProfile};
    pub use crate::domain::repositories::UserRepository;
    pub use crate::error::AppError;
    pub use crate::response::{ResponseCode, StdResponse};
    pub use crate::state::AppState;
}
