//! Core domain entities.
//!
//! Entities are plain data structures without persistence concerns:
//! - [`User`] - A stored account, password hash included
//! - [`UserProfile`] - Credential-free read projection
//! - [`NewUser`], [`UserPatch`] - Creation and partial-update inputs

pub mod user;

pub use user::{NewUser, User, UserPatch, UserProfile};
