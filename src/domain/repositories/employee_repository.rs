//! Repository trait for employee records.

use crate::domain::entities::{Employee, EmployeePatch, NewEmployee};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for employee persistence.
///
/// Each write is a single atomic operation. Email uniqueness is guaranteed by
/// the store itself, so a concurrent writer that slips past a service-level
/// check still receives a validation error.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgEmployeeRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::memory::InMemoryEmployeeRepository`] - In-process implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// Lists every employee ordered by ID.
    async fn list(&self) -> Result<Vec<Employee>, AppError>;

    /// Finds an employee by database ID.
    async fn find_by_id(&self, id: i64) -> Result<Option<Employee>, AppError>;

    /// Finds an employee by exact email.
    async fn find_by_email(&self, email: &str) -> Result<Option<Employee>, AppError>;

    /// Creates a new employee.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] on the `email` field if the email is taken.
    /// Returns [`AppError::Internal`] on storage errors.
    async fn create(&self, new_employee: NewEmployee) -> Result<Employee, AppError>;

    /// Applies a partial update and bumps `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the employee does not exist.
    /// Returns [`AppError::Validation`] on the `email` field if the email is taken.
    async fn update(&self, id: i64, patch: EmployeePatch) -> Result<Employee, AppError>;

    /// Deletes an employee. Returns `false` if nothing was deleted.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;

    /// Counts stored employees.
    async fn count(&self) -> Result<i64, AppError>;
}
