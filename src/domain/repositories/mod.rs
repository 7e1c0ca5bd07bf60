//! Repository trait definitions for the domain layer.
//!
//! Traits define the contract for data operations. Implementations live in
//! `crate::infrastructure::persistence`, and mock implementations are
//! generated via `mockall` for unit tests.
//!
//! # Available Repositories
//!
//! - [`UserRepository`] - User account CRUD

pub mod user_repository;

pub use user_repository::UserRepository;

#[cfg(test)]
pub use user_repository::MockUserRepository;
