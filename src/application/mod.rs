//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations: it hashes and checks passwords,
//! issues session tokens, and turns repository outcomes into response
//! envelopes for the transports.
//!
//! # Available Services
//!
//! - [`services::user_service::UserService`] - Account usecases behind [`services::UserUsecase`]
//! - [`services::token_service::TokenService`] - Session token issuance and verification
//! - [`services::password`] - bcrypt hashing helpers

pub mod services;
