//! Path extractor for `/employees/{id}`.

use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

use crate::error::{AppError, EMPLOYEE_NOT_FOUND};

/// Employee ID taken from the path.
///
/// An ID that is not a valid `i64` (`/employees/abc`, overflow) cannot name
/// a record, so it is answered like any unknown ID: 404 with a JSON body.
pub struct EmployeeId(pub i64);

impl<S> FromRequestParts<S> for EmployeeId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i64>::from_request_parts(parts, state)
            .await
            .map_err(|e| {
                tracing::debug!(error = %e, "Rejected employee id");
                AppError::not_found(EMPLOYEE_NOT_FOUND)
            })?;

        Ok(EmployeeId(id))
    }
}
