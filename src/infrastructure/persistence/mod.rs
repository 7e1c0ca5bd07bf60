//! MongoDB repository implementations.
//!
//! # Repositories
//!
//! - [`MongoUserRepository`] - User account storage

pub mod mongo;
pub mod mongo_user_repository;

pub use mongo::connect;
pub use mongo_user_repository::MongoUserRepository;
