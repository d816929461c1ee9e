//! Infrastructure layer for external integrations.
//!
//! Implements the repository traits defined by the domain layer.
//!
//! - [`persistence`] - PostgreSQL repositories
//! - [`memory`] - In-process repositories guarded by a lock

pub mod memory;
pub mod persistence;
