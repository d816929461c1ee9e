//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{AuthService, EmployeeService, TokenService};
use crate::domain::repositories::{EmployeeRepository, TokenRepository, UserRepository};
use crate::infrastructure::memory::{
    InMemoryEmployeeRepository, InMemoryTokenRepository, InMemoryUserRepository,
};

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub token_service: Arc<TokenService>,
    pub employee_service: Arc<EmployeeService>,
}

impl AppState {
    /// Wires services on top of the given repositories.
    ///
    /// `signing_secret` keys the HMAC used to store bearer tokens.
    pub fn new(
        users: Arc<dyn UserRepository>,
        tokens: Arc<dyn TokenRepository>,
        employees: Arc<dyn EmployeeRepository>,
        signing_secret: String,
    ) -> Self {
        let token_service = Arc::new(TokenService::new(users.clone(), tokens, signing_secret));
        let auth_service = Arc::new(AuthService::new(users, token_service.clone()));
        let employee_service = Arc::new(EmployeeService::new(employees));

        Self {
            auth_service,
            token_service,
            employee_service,
        }
    }

    /// State backed by the in-memory repositories. Nothing is persisted.
    pub fn in_memory(signing_secret: String) -> Self {
        Self::new(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(InMemoryTokenRepository::new()),
            Arc::new(InMemoryEmployeeRepository::new()),
            signing_secret,
        )
    }
}
