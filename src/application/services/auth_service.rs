//! Registration, login and logout.

use std::sync::Arc;

use crate::application::services::token_service::{AuthUser, IssuedToken, TokenService};
use crate::domain::Password;
use crate::domain::entities::{NewUser, User};
use crate::domain::repositories::UserRepository;
use crate::error::{AppError, EMAIL_TAKEN};

/// Message returned when login credentials do not match.
pub const INVALID_CREDENTIALS: &str = "invalid credentials";

/// Input for [`AuthService::register`]. Field formats are validated upstream.
#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Service for user sessions.
///
/// Delegates credential storage to [`UserRepository`] and token handling to
/// [`TokenService`].
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    tokens: Arc<TokenService>,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, tokens: Arc<TokenService>) -> Self {
        Self { users, tokens }
    }

    /// Creates a user and issues their first token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] on `email` if it is already registered.
    /// Returns [`AppError::Internal`] on hashing or storage errors.
    pub async fn register(&self, input: Registration) -> Result<(User, IssuedToken), AppError> {
        if self.email_taken(&input.email).await? {
            return Err(AppError::invalid_field("email", EMAIL_TAKEN));
        }

        let password = Password::hash(&input.password)?;

        let user = self
            .users
            .create(NewUser {
                name: input.name,
                email: input.email,
                password_hash: password.into_string(),
            })
            .await?;

        let token = self.tokens.issue(&user).await?;

        tracing::info!(user_id = user.id, "User registered");
        Ok((user, token))
    }

    /// Whether a user is already registered with `email`.
    pub async fn email_taken(&self, email: &str) -> Result<bool, AppError> {
        Ok(self.users.find_by_email(email).await?.is_some())
    }

    /// Verifies credentials and issues a new token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthenticated`] with [`INVALID_CREDENTIALS`] if the
    /// email is unknown or the password does not match.
    pub async fn login(&self, email: &str, password: &str) -> Result<(User, IssuedToken), AppError> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::unauthenticated(INVALID_CREDENTIALS))?;

        if !Password::from_hash(user.password_hash.as_str()).verify(password) {
            tracing::debug!(user_id = user.id, "Login rejected");
            return Err(AppError::unauthenticated(INVALID_CREDENTIALS));
        }

        let token = self.tokens.issue(&user).await?;

        tracing::info!(user_id = user.id, "User logged in");
        Ok((user, token))
    }

    /// Revokes every token of the authenticated caller.
    pub async fn logout(&self, auth: &AuthUser) -> Result<u64, AppError> {
        let revoked = self.tokens.revoke_all(auth.user.id).await?;
        tracing::info!(
            user_id = auth.user.id,
            token_id = auth.token_id,
            revoked,
            "User logged out"
        );
        Ok(revoked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::AccessToken;
    use crate::domain::repositories::{MockTokenRepository, MockUserRepository};
    use chrono::Utc;

    fn stored_user(id: i64, email: &str, password: &str) -> User {
        let now = Utc::now();
        User {
            id,
            name: "Ana".to_string(),
            email: email.to_string(),
            password_hash: Password::hash(password).unwrap().into_string(),
            created_at: now,
            updated_at: now,
        }
    }

    fn issuing_tokens() -> MockTokenRepository {
        let mut tokens = MockTokenRepository::new();
        tokens.expect_create().returning(|t| {
            Ok(AccessToken {
                id: 1,
                user_id: t.user_id,
                name: t.name,
                token_hash: t.token_hash,
                created_at: Utc::now(),
                last_used_at: None,
            })
        });
        tokens
    }

    fn service(users: MockUserRepository, tokens: MockTokenRepository) -> AuthService {
        let users: Arc<dyn UserRepository> = Arc::new(users);
        let token_service = TokenService::new(users.clone(), Arc::new(tokens), "secret".to_string());
        AuthService::new(users, Arc::new(token_service))
    }

    fn registration() -> Registration {
        Registration {
            name: "Ana".to_string(),
            email: "ana@x.com".to_string(),
            password: "123456".to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_hashes_password_and_issues_token() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_email().times(1).returning(|_| Ok(None));
        users
            .expect_create()
            .withf(|u| u.email == "ana@x.com" && u.password_hash.starts_with("$argon2"))
            .times(1)
            .returning(|u| {
                let now = Utc::now();
                Ok(User {
                    id: 1,
                    name: u.name,
                    email: u.email,
                    password_hash: u.password_hash,
                    created_at: now,
                    updated_at: now,
                })
            });

        let (user, token) = service(users, issuing_tokens())
            .register(registration())
            .await
            .unwrap();

        assert_eq!(user.id, 1);
        assert!(token.plain_text.starts_with("1|"));
    }

    #[tokio::test]
    async fn test_register_duplicate_email_never_creates() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .times(1)
            .returning(|email| Ok(Some(stored_user(1, email, "whatever"))));
        users.expect_create().never();

        let err = service(users, MockTokenRepository::new())
            .register(registration())
            .await
            .unwrap_err();

        match err {
            AppError::Validation { errors, .. } => {
                assert_eq!(errors.get("email").unwrap(), [EMAIL_TAKEN.to_string()]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_login_success() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .returning(|email| Ok(Some(stored_user(1, email, "123456"))));

        let (user, token) = service(users, issuing_tokens())
            .login("ana@x.com", "123456")
            .await
            .unwrap();

        assert_eq!(user.email, "ana@x.com");
        assert!(!token.plain_text.is_empty());
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .returning(|email| Ok(Some(stored_user(1, email, "123456"))));

        let mut tokens = MockTokenRepository::new();
        tokens.expect_create().never();

        let err = service(users, tokens)
            .login("ana@x.com", "wrong-pass")
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Unauthenticated { ref message } if message == INVALID_CREDENTIALS));
    }

    #[tokio::test]
    async fn test_login_unknown_email() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_email().returning(|_| Ok(None));

        let err = service(users, MockTokenRepository::new())
            .login("ghost@x.com", "123456")
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Unauthenticated { .. }));
    }

    #[tokio::test]
    async fn test_logout_revokes_all_tokens() {
        let mut tokens = MockTokenRepository::new();
        tokens
            .expect_delete_for_user()
            .withf(|id| *id == 1)
            .times(1)
            .returning(|_| Ok(3));

        let auth = AuthUser {
            user: stored_user(1, "ana@x.com", "123456"),
            token_id: 1,
        };

        let revoked = service(MockUserRepository::new(), tokens)
            .logout(&auth)
            .await
            .unwrap();

        assert_eq!(revoked, 3);
    }
}
