//! API route configuration.
//!
//! Routes are split by authentication requirement; the bearer guard is
//! attached in [`crate::routes`].

use crate::api::handlers::{
    delete_employee_handler, employee_list_handler, health_handler, login_handler,
    logout_handler, patch_employee_handler, register_handler, replace_employee_handler,
    show_employee_handler, store_employee_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Routes reachable without a token.
///
/// # Endpoints
///
/// - `POST /register` - Create a user and issue a token
/// - `POST /login`    - Exchange credentials for a token
/// - `GET  /health`   - Store connectivity check
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register_handler))
        .route("/login", post(login_handler))
        .route("/health", get(health_handler))
}

/// Routes protected by Bearer token authentication.
///
/// # Endpoints
///
/// - `POST   /logout`          - Revoke every token of the caller
/// - `GET    /employees`       - List employees (404 when empty)
/// - `POST   /employees`       - Create an employee
/// - `GET    /employees/{id}`  - Show an employee
/// - `PUT    /employees/{id}`  - Replace an employee
/// - `PATCH  /employees/{id}`  - Partially update an employee
/// - `DELETE /employees/{id}`  - Delete an employee
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/logout", post(logout_handler))
        .route(
            "/employees",
            get(employee_list_handler).post(store_employee_handler),
        )
        .route(
            "/employees/{id}",
            get(show_employee_handler)
                .put(replace_employee_handler)
                .patch(patch_employee_handler)
                .delete(delete_employee_handler),
        )
}
