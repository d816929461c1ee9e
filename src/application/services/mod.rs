//! Business logic services for the application layer.

pub mod auth_service;
pub mod employee_service;
pub mod token_service;

pub use auth_service::{AuthService, Registration};
pub use employee_service::EmployeeService;
pub use token_service::{AuthUser, IssuedToken, TokenService};
