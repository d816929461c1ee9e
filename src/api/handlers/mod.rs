//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod auth;
pub mod employees;
pub mod health;

pub use auth::{login_handler, logout_handler, register_handler};
pub use employees::{
    delete_employee_handler, employee_list_handler, patch_employee_handler,
    replace_employee_handler, show_employee_handler, store_employee_handler,
};
pub use health::health_handler;
