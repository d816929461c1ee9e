//! JSON extractor that validates the payload before the handler runs.

use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::AppError;

/// Deserializes a JSON body and runs its [`Validate`] rules.
///
/// Both failure modes become [`AppError::Validation`] (400):
/// - a body that is not valid JSON, has the wrong shape, or is sent without
///   `Content-Type: application/json` is reported under the `body` key
/// - rule violations are reported per field
///
/// ```rust,ignore
/// async fn login(ValidatedJson(payload): ValidatedJson<LoginRequest>) {
///     // payload passed every rule
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let value = json_body(Json::<T>::from_request(req, state).await)?;

        value.validate()?;

        Ok(ValidatedJson(value))
    }
}

/// Unwraps a JSON body extracted as `Result<Json<T>, JsonRejection>`.
///
/// Handlers that must look something up before judging the body take the
/// `Result` form and call this once they are ready to report on it.
pub fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    body.map(|Json(value)| value).map_err(|e| {
        tracing::debug!(error = %e, "Rejected request body");
        AppError::invalid_field("body", e.body_text())
    })
}
