//! DTOs for employee endpoints.

use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use validator::{Validate, ValidationError};

use crate::domain::entities::{Employee, EmployeePatch, NewEmployee};
use crate::utils::validation::{
    DATE_FORMAT, PHONE_REGEX, parse_date, validate_date, validate_not_blank,
};

const PHONE_MESSAGE: &str = "the phone must be exactly 10 digits";

/// Request body for `POST /employees` and `PUT /employees/{id}`.
///
/// `phone` is optional; on replace an absent phone keeps the stored one.
#[derive(Debug, Deserialize, Validate)]
pub struct StoreEmployeeRequest {
    #[validate(
        required(message = "the name field is required"),
        custom(function = "validate_not_blank"),
        length(max = 255, message = "the name must not be greater than 255 characters")
    )]
    pub name: Option<String>,

    #[validate(
        required(message = "the email field is required"),
        email(message = "the email must be a valid email address"),
        length(max = 255, message = "the email must not be greater than 255 characters")
    )]
    pub email: Option<String>,

    #[validate(regex(path = "*PHONE_REGEX", message = "the phone must be exactly 10 digits"))]
    pub phone: Option<String>,

    #[validate(
        required(message = "the birth date field is required"),
        custom(function = "validate_date")
    )]
    pub birth_date: Option<String>,
}

impl StoreEmployeeRequest {
    /// Converts a validated request into the full field set.
    ///
    /// Returns `None` only if called on a request that failed validation.
    pub fn into_new_employee(self) -> Option<NewEmployee> {
        Some(NewEmployee {
            name: self.name?,
            email: self.email?,
            phone: self.phone,
            birth_date: parse_date(self.birth_date.as_deref()?)?,
        })
    }
}

/// Request body for `PATCH /employees/{id}`.
///
/// Every field is optional, but a field that is sent must be valid.
/// `phone` is kept as a double option so that `"phone": null` is reported
/// instead of being read as absent.
#[derive(Debug, Deserialize, Validate)]
#[validate(schema(function = "validate_patch_phone", skip_on_field_errors = false))]
pub struct PatchEmployeeRequest {
    #[validate(
        custom(function = "validate_not_blank"),
        length(max = 255, message = "the name must not be greater than 255 characters")
    )]
    pub name: Option<String>,

    #[validate(
        email(message = "the email must be a valid email address"),
        length(max = 255, message = "the email must not be greater than 255 characters")
    )]
    pub email: Option<String>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    pub phone: Option<Option<String>>,

    #[validate(custom(function = "validate_date"))]
    pub birth_date: Option<String>,
}

impl PatchEmployeeRequest {
    /// Converts a validated request into a patch.
    pub fn into_patch(self) -> EmployeePatch {
        EmployeePatch {
            name: self.name,
            email: self.email,
            phone: self.phone.flatten(),
            birth_date: self.birth_date.as_deref().and_then(parse_date),
        }
    }
}

/// Reported under `phone`.
fn validate_patch_phone(req: &PatchEmployeeRequest) -> Result<(), ValidationError> {
    match &req.phone {
        Some(Some(phone)) if PHONE_REGEX.is_match(phone) => Ok(()),
        Some(_) => Err(ValidationError::new("phone").with_message(Cow::Borrowed(PHONE_MESSAGE))),
        None => Ok(()),
    }
}

/// Employee as returned by the API; `birth_date` is `YYYY-MM-DD`.
#[derive(Debug, Serialize)]
pub struct EmployeeItem {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub birth_date: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Employee> for EmployeeItem {
    fn from(e: Employee) -> Self {
        Self {
            id: e.id,
            name: e.name,
            email: e.email,
            phone: e.phone,
            birth_date: e.birth_date.format(DATE_FORMAT).to_string(),
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}

/// `{ "message": ..., "employee": {...}, "status": ... }`
#[derive(Debug, Serialize)]
pub struct EmployeeResponse {
    pub message: String,
    pub employee: EmployeeItem,
    pub status: u16,
}

impl EmployeeResponse {
    pub fn ok(message: &str, employee: Employee) -> Self {
        Self {
            message: message.to_string(),
            employee: employee.into(),
            status: StatusCode::OK.as_u16(),
        }
    }
}
