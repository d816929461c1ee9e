//! In-memory implementation of employee repository.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::domain::entities::{Employee, EmployeePatch, NewEmployee};
use crate::domain::repositories::EmployeeRepository;
use crate::error::{AppError, EMAIL_TAKEN, EMPLOYEE_NOT_FOUND};

#[derive(Default)]
struct State {
    next_id: i64,
    rows: BTreeMap<i64, Employee>,
}

impl State {
    fn email_taken(&self, email: &str, except_id: Option<i64>) -> bool {
        self.rows
            .values()
            .any(|e| e.email == email && Some(e.id) != except_id)
    }
}

/// Employee repository backed by an ordered map, so listings are by ID.
#[derive(Default)]
pub struct InMemoryEmployeeRepository {
    state: RwLock<State>,
}

impl InMemoryEmployeeRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EmployeeRepository for InMemoryEmployeeRepository {
    async fn list(&self) -> Result<Vec<Employee>, AppError> {
        Ok(self.state.read().await.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Employee>, AppError> {
        Ok(self.state.read().await.rows.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Employee>, AppError> {
        Ok(self
            .state
            .read()
            .await
            .rows
            .values()
            .find(|e| e.email == email)
            .cloned())
    }

    async fn create(&self, new_employee: NewEmployee) -> Result<Employee, AppError> {
        let mut state = self.state.write().await;

        if state.email_taken(&new_employee.email, None) {
            return Err(AppError::invalid_field("email", EMAIL_TAKEN));
        }

        state.next_id += 1;
        let now = Utc::now();
        let employee = Employee {
            id: state.next_id,
            name: new_employee.name,
            email: new_employee.email,
            phone: new_employee.phone,
            birth_date: new_employee.birth_date,
            created_at: now,
            updated_at: now,
        };
        state.rows.insert(employee.id, employee.clone());

        Ok(employee)
    }

    async fn update(&self, id: i64, patch: EmployeePatch) -> Result<Employee, AppError> {
        let mut state = self.state.write().await;

        if let Some(email) = &patch.email
            && state.email_taken(email, Some(id))
        {
            return Err(AppError::invalid_field("email", EMAIL_TAKEN));
        }

        let row = state
            .rows
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(EMPLOYEE_NOT_FOUND))?;

        let mut updated = row.patched(&patch);
        updated.updated_at = Utc::now();
        *row = updated.clone();

        Ok(updated)
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.state.write().await.rows.remove(&id).is_some())
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.state.read().await.rows.len() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn fields(email: &str) -> NewEmployee {
        NewEmployee {
            name: "Bob".to_string(),
            email: email.to_string(),
            phone: None,
            birth_date: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_create_enforces_unique_email() {
        let repo = InMemoryEmployeeRepository::new();
        repo.create(fields("bob@x.com")).await.unwrap();

        let err = repo.create(fields("bob@x.com")).await.unwrap_err();

        assert!(matches!(err, AppError::Validation { .. }));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_update_allows_own_email_and_rejects_others() {
        let repo = InMemoryEmployeeRepository::new();
        let bob = repo.create(fields("bob@x.com")).await.unwrap();
        repo.create(fields("carol@x.com")).await.unwrap();

        let own = EmployeePatch {
            email: Some("bob@x.com".to_string()),
            ..Default::default()
        };
        assert!(repo.update(bob.id, own).await.is_ok());

        let other = EmployeePatch {
            email: Some("carol@x.com".to_string()),
            ..Default::default()
        };
        let err = repo.update(bob.id, other).await.unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));

        let stored = repo.find_by_id(bob.id).await.unwrap().unwrap();
        assert_eq!(stored.email, "bob@x.com");
    }

    #[tokio::test]
    async fn test_update_missing_row() {
        let repo = InMemoryEmployeeRepository::new();

        let err = repo.update(7, EmployeePatch::default()).await.unwrap_err();

        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let repo = InMemoryEmployeeRepository::new();
        let bob = repo.create(fields("bob@x.com")).await.unwrap();

        assert!(repo.delete(bob.id).await.unwrap());
        assert!(!repo.delete(bob.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_is_ordered_by_id() {
        let repo = InMemoryEmployeeRepository::new();
        repo.create(fields("b@x.com")).await.unwrap();
        repo.create(fields("a@x.com")).await.unwrap();

        let ids: Vec<i64> = repo.list().await.unwrap().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }
}
