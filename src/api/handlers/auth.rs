//! Handlers for registration, login and logout.

use axum::{
    Extension, Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::api::dto::auth::{AuthResponse, LoginRequest, RegisterRequest};
use crate::api::dto::message::MessageResponse;
use crate::api::extractors::{ValidatedJson, json_body};
use crate::application::services::AuthUser;
use crate::error::{AppError, EMAIL_TAKEN, FieldErrors};
use crate::state::AppState;

/// Registers a user and returns their first token.
///
/// # Endpoint
///
/// `POST /register`
///
/// # Request Body
///
/// ```json
/// {
///   "name": "Ana",
///   "email": "ana@x.com",
///   "password": "123456",
///   "password_confirmation": "123456"
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request listing every invalid field, including an email
/// that is already registered.
pub async fn register_handler(
    State(state): State<AppState>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    let payload = json_body(body)?;

    let mut errors = FieldErrors::collect(&payload);
    if let Some(email) = payload.email.as_deref()
        && errors.get("email").is_none()
        && state.auth_service.email_taken(email).await?
    {
        errors.add("email", EMAIL_TAKEN);
    }
    errors.into_result()?;

    let (user, token) = state
        .auth_service
        .register(payload.into_registration())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse::new(
            "user registered",
            user,
            token,
            StatusCode::CREATED,
        )),
    ))
}

/// Exchanges credentials for a new token.
///
/// # Endpoint
///
/// `POST /login`
///
/// # Errors
///
/// Returns 400 Bad Request if a field is missing or the email is malformed.
/// Returns 401 Unauthorized with `"invalid credentials"` otherwise.
pub async fn login_handler(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let email = payload.email.unwrap_or_default();
    let password = payload.password.unwrap_or_default();

    let (user, token) = state.auth_service.login(&email, &password).await?;

    Ok(Json(AuthResponse::new(
        "user logged in",
        user,
        token,
        StatusCode::OK,
    )))
}

/// Revokes every token of the caller.
///
/// # Endpoint
///
/// `POST /logout` (Bearer token required)
pub async fn logout_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<MessageResponse>, AppError> {
    state.auth_service.logout(&auth).await?;

    Ok(Json(MessageResponse::new("logged out", StatusCode::OK)))
}
