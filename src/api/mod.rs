//! REST API layer for HTTP request/response handling.
//!
//! This layer translates HTTP requests into service calls and shapes the
//! JSON responses.
//!
//! # Modules
//!
//! - [`dto`] - Request bodies (with validation rules) and response bodies
//! - [`extractors`] - Request extractors that decode and validate input
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Bearer authentication and request tracing
//! - [`routes`] - Route configuration and composition

pub mod dto;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod routes;
