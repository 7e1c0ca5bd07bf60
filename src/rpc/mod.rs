//! RPC front end: `user.v1.UserService` served as JSON over HTTP.
//!
//! Runs on its own listener. Each method is a `POST` to
//! `/user.v1.UserService/{Method}` and always answers HTTP 200 with a
//! `{code, message, data?}` envelope, except when authentication fails.
//!
//! # Modules
//!
//! - [`messages`] - Request and reply payloads
//! - [`handlers`] - Method implementations
//! - [`routes`] - Router with authentication and tracing

pub mod handlers;
pub mod messages;
pub mod routes;

pub use routes::rpc_router;
