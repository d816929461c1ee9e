//! Application layer services implementing business logic.
//!
//! Services coordinate repository calls and business rules, and give HTTP
//! handlers a small API to call.
//!
//! - [`services::token_service::TokenService`] - Bearer token issue/validate/revoke
//! - [`services::auth_service::AuthService`] - Registration, login and logout
//! - [`services::employee_service::EmployeeService`] - Employee CRUD rules

pub mod services;
