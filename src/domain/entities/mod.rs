//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures without business logic. Records that are
//! created from user input have a separate "new" struct, and employees also have
//! a patch struct for partial updates:
//!
//! - [`User`] / [`NewUser`] - Registered API user
//! - [`AccessToken`] / [`NewAccessToken`] - Issued bearer token (hashed)
//! - [`Employee`] / [`NewEmployee`] / [`EmployeePatch`] - Employee record

pub mod access_token;
pub mod employee;
pub mod user;

pub use access_token::{AccessToken, NewAccessToken};
pub use employee::{Employee, EmployeePatch, NewEmployee};
pub use user::{NewUser, User};
