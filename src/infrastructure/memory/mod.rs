//! In-process repository implementations.
//!
//! Each repository keeps its rows behind a `tokio::sync::RwLock`; every write
//! (including its uniqueness check) happens under a single write guard, which
//! gives the same atomicity as the database constraints. Used for tests and
//! for running the API without PostgreSQL.

pub mod memory_employee_repository;
pub mod memory_token_repository;
pub mod memory_user_repository;

pub use memory_employee_repository::InMemoryEmployeeRepository;
pub use memory_token_repository::InMemoryTokenRepository;
pub use memory_user_repository::InMemoryUserRepository;
