//! REST API layer for HTTP request/response handling.
//!
//! This layer translates HTTP requests into usecase calls and formats
//! responses as status-coded envelopes.
//!
//! # Modules
//!
//! - [`dto`] - Data Transfer Objects for request/response serialization
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Authentication and request tracing middleware
//! - [`routes`] - Route configuration and composition
//! - [`validation`] - Request shape rules shared with the RPC front end

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod validation;
