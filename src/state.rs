//! Shared application state for both front ends.

use std::sync::Arc;

use crate::application::services::{TokenService, UserUsecase};

/// Global application state shared across all request handlers.
///
/// Cloning is cheap; the services sit behind `Arc`s.
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserUsecase>,
    pub token_service: Arc<TokenService>,
}

impl AppState {
    pub fn new(user_service: Arc<dyn UserUsecase>, token_service: Arc<TokenService>) -> Self {
        Self {
            user_service,
            token_service,
        }
    }
}
