//! Data Transfer Objects for API requests and responses.
//!
//! Request DTOs keep every field optional so that a missing field surfaces
//! as a field-level validation error instead of a deserialization failure.

pub mod auth;
pub mod employee;
pub mod health;
pub mod message;
