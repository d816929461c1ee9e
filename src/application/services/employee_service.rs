//! Employee management service.

use std::sync::Arc;

use crate::domain::entities::{Employee, EmployeePatch, NewEmployee};
use crate::domain::repositories::EmployeeRepository;
use crate::error::{AppError, EMAIL_TAKEN, EMPLOYEE_NOT_FOUND};

/// Service for employee CRUD.
///
/// Field formats are validated by the request DTOs before reaching this
/// service. Here we enforce existence and email uniqueness:
/// - create: the email must be unused
/// - replace / patch: the email must be unused by any *other* employee
pub struct EmployeeService {
    repository: Arc<dyn EmployeeRepository>,
}

impl EmployeeService {
    pub fn new(repository: Arc<dyn EmployeeRepository>) -> Self {
        Self { repository }
    }

    /// Lists all employees ordered by ID.
    pub async fn list(&self) -> Result<Vec<Employee>, AppError> {
        self.repository.list().await
    }

    /// Retrieves an employee by ID.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the employee does not exist.
    pub async fn get(&self, id: i64) -> Result<Employee, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(EMPLOYEE_NOT_FOUND))
    }

    /// Creates an employee.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] on `email` if it is already taken.
    pub async fn create(&self, fields: NewEmployee) -> Result<Employee, AppError> {
        self.ensure_email_available(&fields.email, None).await?;

        let employee = self.repository.create(fields).await?;
        tracing::info!(employee_id = employee.id, "Employee created");
        Ok(employee)
    }

    /// Replaces every required field of an employee. An absent phone is kept.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the employee does not exist.
    /// Returns [`AppError::Validation`] on `email` if another employee uses it.
    pub async fn replace(&self, id: i64, fields: NewEmployee) -> Result<Employee, AppError> {
        self.get(id).await?;
        self.ensure_email_available(&fields.email, Some(id)).await?;

        let employee = self.repository.update(id, EmployeePatch::from(fields)).await?;
        tracing::info!(employee_id = id, "Employee replaced");
        Ok(employee)
    }

    /// Applies only the supplied fields.
    ///
    /// An empty patch returns the current record untouched.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the employee does not exist.
    /// Returns [`AppError::Validation`] on `email` if another employee uses it.
    pub async fn patch(&self, id: i64, patch: EmployeePatch) -> Result<Employee, AppError> {
        let current = self.get(id).await?;

        if patch.is_empty() {
            return Ok(current);
        }

        if let Some(email) = &patch.email {
            self.ensure_email_available(email, Some(id)).await?;
        }

        let employee = self.repository.update(id, patch).await?;
        tracing::info!(employee_id = id, "Employee patched");
        Ok(employee)
    }

    /// Deletes an employee.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the employee does not exist, including
    /// when it was already deleted.
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if !self.repository.delete(id).await? {
            return Err(AppError::not_found(EMPLOYEE_NOT_FOUND));
        }

        tracing::info!(employee_id = id, "Employee deleted");
        Ok(())
    }

    /// Counts stored employees.
    pub async fn count(&self) -> Result<i64, AppError> {
        self.repository.count().await
    }

    /// Whether `email` belongs to an employee other than `except_id`.
    pub async fn email_taken(&self, email: &str, except_id: Option<i64>) -> Result<bool, AppError> {
        Ok(self
            .repository
            .find_by_email(email)
            .await?
            .is_some_and(|existing| Some(existing.id) != except_id))
    }

    async fn ensure_email_available(&self, email: &str, except_id: Option<i64>) -> Result<(), AppError> {
        if self.email_taken(email, except_id).await? {
            return Err(AppError::invalid_field("email", EMAIL_TAKEN));
        }
        Ok(())
    }
}
