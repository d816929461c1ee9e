//! HTTP middleware for request processing.
//!
//! Provides bearer authentication and observability middleware.

pub mod auth;
pub mod tracing;
