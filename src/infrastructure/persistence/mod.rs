//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx. Email
//! uniqueness relies on the `users_email_key` and `employees_email_key`
//! constraints; violations surface as validation errors through
//! `From<sqlx::Error> for AppError`.
//!
//! - [`PgUserRepository`] - User credentials
//! - [`PgTokenRepository`] - Access token storage and lookup
//! - [`PgEmployeeRepository`] - Employee records

pub mod pg_employee_repository;
pub mod pg_token_repository;
pub mod pg_user_repository;

pub use pg_employee_repository::PgEmployeeRepository;
pub use pg_token_repository::PgTokenRepository;
pub use pg_user_repository::PgUserRepository;
