//! Handlers for employee CRUD endpoints.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use validator::Validate;

use crate::api::dto::employee::{
    EmployeeItem, EmployeeResponse, PatchEmployeeRequest, StoreEmployeeRequest,
};
use crate::api::dto::message::MessageResponse;
use crate::api::extractors::{EmployeeId, json_body};
use crate::domain::entities::NewEmployee;
use crate::error::{AppError, EMAIL_TAKEN, FieldErrors};
use crate::state::AppState;

/// Message returned by the list endpoint when there are no employees.
pub const NO_EMPLOYEES: &str = "no employees found";

/// Lists every employee ordered by ID.
///
/// # Endpoint
///
/// `GET /employees`
///
/// # Response
///
/// A bare JSON array. An empty store answers **404** with
/// `{"message": "no employees found", "status": 404}`.
pub async fn employee_list_handler(State(state): State<AppState>) -> Result<Response, AppError> {
    let employees = state.employee_service.list().await?;

    if employees.is_empty() {
        return Ok((
            StatusCode::NOT_FOUND,
            Json(MessageResponse::new(NO_EMPLOYEES, StatusCode::NOT_FOUND)),
        )
            .into_response());
    }

    let items: Vec<EmployeeItem> = employees.into_iter().map(EmployeeItem::from).collect();
    Ok(Json(items).into_response())
}

/// Creates an employee.
///
/// # Endpoint
///
/// `POST /employees`
///
/// # Request Body
///
/// ```json
/// {
///   "name": "Bob",
///   "email": "bob@x.com",
///   "phone": "5551234567",   // optional
///   "birth_date": "1990-01-01"
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request listing every invalid field, including a taken email.
pub async fn store_employee_handler(
    State(state): State<AppState>,
    body: Result<Json<StoreEmployeeRequest>, JsonRejection>,
) -> Result<Json<EmployeeResponse>, AppError> {
    let payload = json_body(body)?;
    check_fields(&state, &payload, payload.email.as_deref(), None).await?;

    let employee = state
        .employee_service
        .create(new_employee(payload)?)
        .await?;

    Ok(Json(EmployeeResponse::ok("employee created", employee)))
}

/// Returns one employee.
///
/// # Endpoint
///
/// `GET /employees/{id}`
///
/// # Errors
///
/// Returns 404 Not Found if no employee has this ID.
pub async fn show_employee_handler(
    EmployeeId(id): EmployeeId,
    State(state): State<AppState>,
) -> Result<Json<EmployeeResponse>, AppError> {
    let employee = state.employee_service.get(id).await?;

    Ok(Json(EmployeeResponse::ok("employee retrieved", employee)))
}

/// Replaces every field of an employee.
///
/// # Endpoint
///
/// `PUT /employees/{id}`
///
/// Same body and rules as create. Keeping the employee's own email is
/// allowed; omitting `phone` keeps the stored one.
///
/// # Errors
///
/// Returns 404 Not Found if no employee has this ID, whatever the body.
/// Returns 400 Bad Request if validation fails or another employee has the email.
pub async fn replace_employee_handler(
    EmployeeId(id): EmployeeId,
    State(state): State<AppState>,
    body: Result<Json<StoreEmployeeRequest>, JsonRejection>,
) -> Result<Json<EmployeeResponse>, AppError> {
    state.employee_service.get(id).await?;
    let payload = json_body(body)?;
    check_fields(&state, &payload, payload.email.as_deref(), Some(id)).await?;

    let employee = state
        .employee_service
        .replace(id, new_employee(payload)?)
        .await?;

    Ok(Json(EmployeeResponse::ok("employee updated", employee)))
}

/// Partially updates an employee.
///
/// # Endpoint
///
/// `PATCH /employees/{id}`
///
/// # Request Body
///
/// Any subset of the create fields. Only provided fields change, and each
/// must be valid; `"phone": null` is rejected.
///
/// # Errors
///
/// Returns 404 Not Found if no employee has this ID, whatever the body.
/// Returns 400 Bad Request if a provided field is invalid.
pub async fn patch_employee_handler(
    EmployeeId(id): EmployeeId,
    State(state): State<AppState>,
    body: Result<Json<PatchEmployeeRequest>, JsonRejection>,
) -> Result<Json<EmployeeResponse>, AppError> {
    state.employee_service.get(id).await?;
    let payload = json_body(body)?;
    check_fields(&state, &payload, payload.email.as_deref(), Some(id)).await?;

    let employee = state
        .employee_service
        .patch(id, payload.into_patch())
        .await?;

    Ok(Json(EmployeeResponse::ok("employee updated", employee)))
}

/// Deletes an employee.
///
/// # Endpoint
///
/// `DELETE /employees/{id}`
///
/// # Errors
///
/// Returns 404 Not Found if no employee has this ID, including a second
/// delete of the same ID.
pub async fn delete_employee_handler(
    EmployeeId(id): EmployeeId,
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, AppError> {
    state.employee_service.delete(id).await?;

    Ok(Json(MessageResponse::new("employee deleted", StatusCode::OK)))
}

/// Field rules plus email uniqueness, reported together.
async fn check_fields(
    state: &AppState,
    payload: &impl Validate,
    email: Option<&str>,
    except_id: Option<i64>,
) -> Result<(), AppError> {
    let mut errors = FieldErrors::collect(payload);

    if let Some(email) = email
        && errors.get("email").is_none()
        && state.employee_service.email_taken(email, except_id).await?
    {
        errors.add("email", EMAIL_TAKEN);
    }

    errors.into_result()
}

fn new_employee(payload: StoreEmployeeRequest) -> Result<NewEmployee, AppError> {
    payload
        .into_new_employee()
        .ok_or_else(|| AppError::invalid_field("body", "incomplete employee fields"))
}
