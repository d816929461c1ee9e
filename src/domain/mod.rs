//! Domain layer containing business entities and repository contracts.
//!
//! The domain layer has no dependencies on the HTTP or persistence layers.
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`password`] - Argon2 password hashing value object

pub mod entities;
pub mod password;
pub mod repositories;

pub use password::Password;
