//! Domain layer containing business entities and repository contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`user_counter`] - Background task reporting the user total
//!
//! The domain layer has no dependencies on infrastructure or transport
//! layers. Repository traits are implemented in `crate::infrastructure`.

pub mod entities;
pub mod repositories;
pub mod user_counter;
