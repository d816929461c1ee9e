//! Application error type and its JSON representation.
//!
//! Every error leaves the service as
//!
//! ```json
//! { "message": "validation error", "errors": { "email": ["..."] }, "status": 400 }
//! ```
//!
//! where `errors` is only present for validation failures.

use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::collections::BTreeMap;
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

/// Message used for every validation failure.
pub const VALIDATION_MESSAGE: &str = "validation error";

/// Message reported when an email is already in use.
pub const EMAIL_TAKEN: &str = "the email has already been taken";

/// Message returned when an employee ID does not exist.
pub const EMPLOYEE_NOT_FOUND: &str = "employee not found";

/// Field name → list of human-readable messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs the [`Validate`] rules of `value`, keeping every failure.
    ///
    /// Lets callers add checks that need storage (email uniqueness) to the
    /// same set before failing.
    pub fn collect<T: Validate>(value: &T) -> Self {
        match value.validate() {
            Ok(()) => Self::new(),
            Err(errors) => Self::from(&errors),
        }
    }

    /// Creates a set holding a single message for `field`.
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Messages recorded for `field`, if any.
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// `Ok` when empty, otherwise a validation error carrying every field.
    pub fn into_result(self) -> Result<(), AppError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(AppError::validation(self))
        }
    }

    /// Fields in name order with their messages.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

impl From<&ValidationErrors> for FieldErrors {
    fn from(errors: &ValidationErrors) -> Self {
        let mut out = FieldErrors::new();
        for (field, kind) in errors.errors() {
            if let ValidationErrorsKind::Field(errs) = kind {
                for e in errs {
                    // Struct-level rules report under `__all__`; their code names the field.
                    let field = if &**field == "__all__" {
                        e.code.to_string()
                    } else {
                        field.to_string()
                    };
                    let message = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("the {} field is invalid", field));
                    out.add(field, message);
                }
            }
        }
        out
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, errors: FieldErrors },
    #[error("{message}")]
    Unauthenticated { message: String },
    #[error("{message}")]
    NotFound { message: String },
    #[error("{message}")]
    Internal { message: String },
}

impl AppError {
    pub fn validation(errors: FieldErrors) -> Self {
        Self::Validation {
            message: VALIDATION_MESSAGE.to_string(),
            errors,
        }
    }

    /// Validation failure for a single field.
    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::validation(FieldErrors::single(field, message))
    }

    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::Unauthenticated {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::Unauthenticated { .. } => StatusCode::UNAUTHORIZED,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<FieldErrors>,
    status: u16,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let is_unauthenticated = matches!(self, AppError::Unauthenticated { .. });

        let (message, errors) = match self {
            AppError::Validation { message, errors } => (message, Some(errors)),
            AppError::Unauthenticated { message }
            | AppError::NotFound { message }
            | AppError::Internal { message } => (message, None),
        };

        let body = ErrorBody {
            message,
            errors,
            status: status.as_u16(),
        };

        let mut response = (status, Json(body)).into_response();
        if is_unauthenticated {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::validation(FieldErrors::from(&errors))
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error()
            && db.is_unique_violation()
            && is_email_constraint(db.constraint())
        {
            return AppError::invalid_field("email", EMAIL_TAKEN);
        }

        tracing::error!(error = %e, "Database error");
        AppError::internal("Database error")
    }
}

fn is_email_constraint(constraint: Option<&str>) -> bool {
    matches!(
        constraint,
        Some("users_email_key") | Some("employees_email_key")
    )
}
