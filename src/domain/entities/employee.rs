//! Employee entity and its write models.

use chrono::{DateTime, NaiveDate, Utc};

/// An employee record.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Employee {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub birth_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Employee {
    /// Returns a copy with `patch` applied, leaving absent fields untouched.
    ///
    /// Timestamps are not modified; the repository owns `updated_at`.
    pub fn patched(&self, patch: &EmployeePatch) -> Employee {
        Employee {
            id: self.id,
            name: patch.name.clone().unwrap_or_else(|| self.name.clone()),
            email: patch.email.clone().unwrap_or_else(|| self.email.clone()),
            phone: patch.phone.clone().or_else(|| self.phone.clone()),
            birth_date: patch.birth_date.unwrap_or(self.birth_date),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Full set of writable employee fields, used for create and replace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEmployee {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub birth_date: NaiveDate,
}

/// Partial update for an existing employee.
///
/// `None` fields are left unchanged. A stored phone is never cleared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeePatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub birth_date: Option<NaiveDate>,
}

impl EmployeePatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.birth_date.is_none()
    }
}

impl From<NewEmployee> for EmployeePatch {
    /// A replace sets every required field; an absent phone keeps the stored one.
    fn from(fields: NewEmployee) -> Self {
        EmployeePatch {
            name: Some(fields.name),
            email: Some(fields.email),
            phone: fields.phone,
            birth_date: Some(fields.birth_date),
        }
    }
}
