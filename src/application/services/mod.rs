//! Business logic services for the application layer.

pub mod password;
pub mod token_service;
pub mod user_service;

pub use token_service::{Claims, IssuedToken, TokenService};
pub use user_service::{UserService, UserUsecase};
