//! PostgreSQL implementation of employee repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Employee, EmployeePatch, NewEmployee};
use crate::domain::repositories::EmployeeRepository;
use crate::error::{AppError, EMPLOYEE_NOT_FOUND};

const EMPLOYEE_COLUMNS: &str = "id, name, email, phone, birth_date, created_at, updated_at";

/// PostgreSQL repository for employee records.
///
/// Every write is a single statement, so readers never observe a partially
/// applied update.
pub struct PgEmployeeRepository {
    pool: Arc<PgPool>,
}

impl PgEmployeeRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EmployeeRepository for PgEmployeeRepository {
    async fn list(&self) -> Result<Vec<Employee>, AppError> {
        let rows = sqlx::query_as::<_, Employee>(&format!(
            "SELECT {EMPLOYEE_COLUMNS} FROM employees ORDER BY id"
        ))
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Employee>, AppError> {
        let row = sqlx::query_as::<_, Employee>(&format!(
            "SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Employee>, AppError> {
        let row = sqlx::query_as::<_, Employee>(&format!(
            "SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row)
    }

    async fn create(&self, new_employee: NewEmployee) -> Result<Employee, AppError> {
        let row = sqlx::query_as::<_, Employee>(&format!(
            r#"
            INSERT INTO employees (name, email, phone, birth_date)
            VALUES ($1, $2, $3, $4)
            RETURNING {EMPLOYEE_COLUMNS}
            "#
        ))
        .bind(new_employee.name)
        .bind(new_employee.email)
        .bind(new_employee.phone)
        .bind(new_employee.birth_date)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row)
    }

    async fn update(&self, id: i64, patch: EmployeePatch) -> Result<Employee, AppError> {
        let row = sqlx::query_as::<_, Employee>(&format!(
            r#"
            UPDATE employees SET
                name       = COALESCE($2::TEXT, name),
                email      = COALESCE($3::TEXT, email),
                phone      = COALESCE($4::TEXT, phone),
                birth_date = COALESCE($5::DATE, birth_date),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {EMPLOYEE_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(patch.name)
        .bind(patch.email)
        .bind(patch.phone)
        .bind(patch.birth_date)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.ok_or_else(|| AppError::not_found(EMPLOYEE_NOT_FOUND))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM employees WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM employees")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
