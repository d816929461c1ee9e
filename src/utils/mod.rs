//! Utility functions shared across layers.
//!
//! - [`token_generator`] - Random bearer-token secrets
//! - [`validation`] - Field rules used by request DTOs

pub mod token_generator;
pub mod validation;
