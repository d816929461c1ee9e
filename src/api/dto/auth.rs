//! DTOs for registration, login and logout.

use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use validator::{Validate, ValidationError};

use crate::application::services::{IssuedToken, Registration};
use crate::domain::entities::User;
use crate::utils::validation::validate_not_blank;

/// Request body for `POST /register`.
#[derive(Debug, Deserialize, Validate)]
#[validate(schema(function = "validate_password_confirmation", skip_on_field_errors = false))]
pub struct RegisterRequest {
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

    #[validate(
        required(message = "the password field is required"),
        length(min = 6, message = "the password must be at least 6 characters")
    )]
    pub password: Option<String>,

    pub password_confirmation: Option<String>,
}

impl RegisterRequest {
    /// Converts a validated request into service input.
    pub fn into_registration(self) -> Registration {
        Registration {
            name: self.name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            password: self.password.unwrap_or_default(),
        }
    }
}

/// Reported under `password`.
fn validate_password_confirmation(req: &RegisterRequest) -> Result<(), ValidationError> {
    match &req.password {
        Some(password) if req.password_confirmation.as_ref() != Some(password) => Err(
            ValidationError::new("password")
                .with_message(Cow::Borrowed("the password confirmation does not match")),
        ),
        _ => Ok(()),
    }
}

/// Request body for `POST /login`.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(
        required(message = "the email field is required"),
        email(message = "the email must be a valid email address")
    )]
    pub email: Option<String>,

    #[validate(
        required(message = "the password field is required"),
        custom(function = "validate_not_blank")
    )]
    pub password: Option<String>,
}

/// Public view of a user. The password hash is never part of it.
#[derive(Debug, Serialize)]
pub struct UserItem {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserItem {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Response for register and login.
///
/// ```json
/// {
///   "message": "user registered",
///   "user": { "id": 1, "name": "Ana", "email": "ana@x.com", ... },
///   "token": "1|hY3...",
///   "status": 201
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub message: String,
    pub user: UserItem,
    pub token: String,
    pub status: u16,
}

impl AuthResponse {
    pub fn new(message: &str, user: User, token: IssuedToken, status: StatusCode) -> Self {
        Self {
            message: message.to_string(),
            user: user.into(),
            token: token.plain_text,
            status: status.as_u16(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FieldErrors;

    fn register(body: serde_json::Value) -> Result<RegisterRequest, FieldErrors> {
        let req: RegisterRequest = serde_json::from_value(body).unwrap();
        match req.validate() {
            Ok(()) => Ok(req),
            Err(e) => Err(FieldErrors::from(&e)),
        }
    }

    #[test]
    fn test_register_valid() {
        let req = register(serde_json::json!({
            "name": "Ana",
            "email": "ana@x.com",
            "password": "123456",
            "password_confirmation": "123456"
        }))
        .unwrap();

        let reg = req.into_registration();
        assert_eq!(reg.name, "Ana");
        assert_eq!(reg.email, "ana@x.com");
    }

    #[test]
    fn test_register_missing_fields() {
        let errors = register(serde_json::json!({})).unwrap_err();

        assert_eq!(
            errors.get("name").unwrap(),
            ["the name field is required".to_string()]
        );
        assert!(errors.get("email").is_some());
        assert!(errors.get("password").is_some());
    }

    #[test]
    fn test_register_confirmation_mismatch() {
        let errors = register(serde_json::json!({
            "name": "Ana",
            "email": "ana@x.com",
            "password": "123456",
            "password_confirmation": "654321"
        }))
        .unwrap_err();

        assert_eq!(
            errors.get("password").unwrap(),
            ["the password confirmation does not match".to_string()]
        );
    }

    #[test]
    fn test_register_short_password_and_bad_email() {
        let errors = register(serde_json::json!({
            "name": "Ana",
            "email": "not-an-email",
            "password": "123",
            "password_confirmation": "123"
        }))
        .unwrap_err();

        assert!(errors.get("email").is_some());
        assert_eq!(
            errors.get("password").unwrap(),
            ["the password must be at least 6 characters".to_string()]
        );
    }

    #[test]
    fn test_login_requires_both_fields() {
        let req: LoginRequest = serde_json::from_value(serde_json::json!({})).unwrap();
        let errors = FieldErrors::from(&req.validate().unwrap_err());

        assert!(errors.get("email").is_some());
        assert!(errors.get("password").is_some());
    }
}
