//! Repository trait definitions for the domain layer.
//!
//! Traits define the contract for data operations; implementations live in
//! [`crate::infrastructure::persistence`] (PostgreSQL) and
//! [`crate::infrastructure::memory`] (in-process). Mock implementations are
//! generated via `mockall` for unit tests.
//!
//! - [`UserRepository`] - Registered users
//! - [`TokenRepository`] - Issued access tokens
//! - [`EmployeeRepository`] - Employee CRUD

pub mod employee_repository;
pub mod token_repository;
pub mod user_repository;

pub use employee_repository::EmployeeRepository;
pub use token_repository::TokenRepository;
pub use user_repository::UserRepository;

#[cfg(test)]
pub use employee_repository::MockEmployeeRepository;
#[cfg(test)]
pub use token_repository::MockTokenRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
