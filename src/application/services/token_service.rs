//! Bearer token lifecycle: issue, validate, revoke.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::sync::Arc;

use crate::domain::entities::{NewAccessToken, User};
use crate::domain::repositories::{TokenRepository, UserRepository};
use crate::error::AppError;
use crate::utils::token_generator::{format_plain_text, generate_secret, split_plain_text};

type HmacSha256 = Hmac<Sha256>;

/// Message returned for every failed token check.
pub const UNAUTHENTICATED: &str = "Unauthenticated.";

/// Name recorded on tokens issued by register and login.
pub const DEFAULT_TOKEN_NAME: &str = "api_token";

/// A freshly issued token. `plain_text` is only available here.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token_id: i64,
    pub plain_text: String,
}

/// The caller resolved from a valid bearer token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user: User,
    pub token_id: i64,
}

/// Service for issuing and checking bearer tokens.
///
/// Secrets are hashed with HMAC-SHA256 (keyed by `signing_secret`) before
/// storage and comparison, so read access to the database is not enough to
/// forge or verify a token.
pub struct TokenService {
    users: Arc<dyn UserRepository>,
    tokens: Arc<dyn TokenRepository>,
    signing_secret: String,
}

impl TokenService {
    /// Creates a new token service.
    ///
    /// `signing_secret` must match the value used when existing tokens were issued.
    pub fn new(
        users: Arc<dyn UserRepository>,
        tokens: Arc<dyn TokenRepository>,
        signing_secret: String,
    ) -> Self {
        Self {
            users,
            tokens,
            signing_secret,
        }
    }

    /// Hashes a secret with HMAC-SHA256; 64 lowercase hex characters.
    fn hash_secret(&self, secret: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(self.signing_secret.as_bytes())
            .expect("HMAC accepts any key length");
        mac.update(secret.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    /// Issues a new token bound to `user`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the secret cannot be generated or stored.
    pub async fn issue(&self, user: &User) -> Result<IssuedToken, AppError> {
        let secret = generate_secret()?;

        let token = self
            .tokens
            .create(NewAccessToken {
                user_id: user.id,
                name: DEFAULT_TOKEN_NAME.to_string(),
                token_hash: self.hash_secret(&secret),
            })
            .await?;

        tracing::debug!(user_id = user.id, token_id = token.id, "Token issued");

        Ok(IssuedToken {
            token_id: token.id,
            plain_text: format_plain_text(token.id, &secret),
        })
    }

    /// Resolves a presented token to its owner.
    ///
    /// On success the token's `last_used_at` is refreshed; a failure to do so
    /// is logged and ignored.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthenticated`] if the token is malformed, unknown,
    /// revoked, or its owner no longer exists.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn validate(&self, presented: &str) -> Result<AuthUser, AppError> {
        let (claimed_id, secret) =
            split_plain_text(presented).ok_or_else(|| AppError::unauthenticated(UNAUTHENTICATED))?;

        let token = self
            .tokens
            .find_by_hash(&self.hash_secret(secret))
            .await?
            .ok_or_else(|| AppError::unauthenticated(UNAUTHENTICATED))?;

        if claimed_id.is_some_and(|id| id != token.id) {
            tracing::debug!(token_id = token.id, "Token ID prefix mismatch");
            return Err(AppError::unauthenticated(UNAUTHENTICATED));
        }

        let user = self
            .users
            .find_by_id(token.user_id)
            .await?
            .ok_or_else(|| AppError::unauthenticated(UNAUTHENTICATED))?;

        if let Err(e) = self.tokens.touch(token.id).await {
            tracing::warn!(error = %e, token_id = token.id, "Failed to record token usage");
        }

        Ok(AuthUser {
            user,
            token_id: token.id,
        })
    }

    /// Deletes every token owned by `user_id`. Succeeds when there are none.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn revoke_all(&self, user_id: i64) -> Result<u64, AppError> {
        let revoked = self.tokens.delete_for_user(user_id).await?;
        tracing::debug!(user_id, revoked, "Tokens revoked");
        Ok(revoked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::AccessToken;
    use crate::domain::repositories::{MockTokenRepository, MockUserRepository};
    use chrono::Utc;

    fn test_secret() -> String {
        "test-signing-secret".to_string()
    }

    fn compute_expected_hash(secret: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(test_secret().as_bytes())
            .expect("HMAC accepts any key length");
        mac.update(secret.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    fn test_user(id: i64) -> User {
        let now = Utc::now();
        User {
            id,
            name: "Ana".to_string(),
            email: "ana@x.com".to_string(),
            password_hash: "hash".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    fn test_token(id: i64, user_id: i64, token_hash: &str) -> AccessToken {
        AccessToken {
            id,
            user_id,
            name: DEFAULT_TOKEN_NAME.to_string(),
            token_hash: token_hash.to_string(),
            created_at: Utc::now(),
            last_used_at: None,
        }
    }

    fn service(users: MockUserRepository, tokens: MockTokenRepository) -> TokenService {
        TokenService::new(Arc::new(users), Arc::new(tokens), test_secret())
    }

    #[tokio::test]
    async fn test_issue_stores_hash_and_returns_prefixed_plain_text() {
        let mut tokens = MockTokenRepository::new();
        tokens
            .expect_create()
            .withf(|t| t.user_id == 7 && t.name == DEFAULT_TOKEN_NAME && t.token_hash.len() == 64)
            .times(1)
            .returning(|t| Ok(test_token(3, t.user_id, &t.token_hash)));

        let svc = service(MockUserRepository::new(), tokens);
        let issued = svc.issue(&test_user(7)).await.unwrap();

        assert_eq!(issued.token_id, 3);
        let (prefix, secret) = issued.plain_text.split_once('|').unwrap();
        assert_eq!(prefix, "3");
        assert_eq!(secret.len(), 43);
    }

    #[tokio::test]
    async fn test_validate_success_touches_token() {
        let expected_hash = compute_expected_hash("s3cret");
        let stored_hash = expected_hash.clone();

        let mut tokens = MockTokenRepository::new();
        tokens
            .expect_find_by_hash()
            .withf(move |h| h == expected_hash)
            .times(1)
            .returning(move |_| Ok(Some(test_token(5, 1, &stored_hash))));
        tokens
            .expect_touch()
            .withf(|id| *id == 5)
            .times(1)
            .returning(|_| Ok(()));

        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .withf(|id| *id == 1)
            .times(1)
            .returning(|id| Ok(Some(test_user(id))));

        let auth = service(users, tokens).validate("5|s3cret").await.unwrap();

        assert_eq!(auth.user.id, 1);
        assert_eq!(auth.token_id, 5);
    }

    #[tokio::test]
    async fn test_validate_bare_secret_is_accepted() {
        let mut tokens = MockTokenRepository::new();
        tokens
            .expect_find_by_hash()
            .returning(|h| Ok(Some(test_token(9, 1, h))));
        tokens.expect_touch().returning(|_| Ok(()));

        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .returning(|id| Ok(Some(test_user(id))));

        assert!(service(users, tokens).validate("s3cret").await.is_ok());
    }

    #[tokio::test]
    async fn test_validate_unknown_token() {
        let mut tokens = MockTokenRepository::new();
        tokens
            .expect_find_by_hash()
            .times(1)
            .returning(|_| Ok(None));

        let result = service(MockUserRepository::new(), tokens)
            .validate("1|nope")
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Unauthenticated { .. }));
    }

    #[tokio::test]
    async fn test_validate_prefix_mismatch() {
        let mut tokens = MockTokenRepository::new();
        tokens
            .expect_find_by_hash()
            .returning(|h| Ok(Some(test_token(2, 1, h))));

        let result = service(MockUserRepository::new(), tokens)
            .validate("99|s3cret")
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Unauthenticated { .. }));
    }

    #[tokio::test]
    async fn test_validate_malformed_prefix_skips_lookup() {
        let tokens = MockTokenRepository::new();

        let result = service(MockUserRepository::new(), tokens)
            .validate("abc|s3cret")
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Unauthenticated { .. }));
    }

    #[tokio::test]
    async fn test_validate_ignores_touch_failure() {
        let mut tokens = MockTokenRepository::new();
        tokens
            .expect_find_by_hash()
            .returning(|h| Ok(Some(test_token(4, 1, h))));
        tokens
            .expect_touch()
            .returning(|_| Err(AppError::internal("Database error")));

        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .returning(|id| Ok(Some(test_user(id))));

        assert!(service(users, tokens).validate("4|s3cret").await.is_ok());
    }

    #[tokio::test]
    async fn test_revoke_all_with_no_tokens_succeeds() {
        let mut tokens = MockTokenRepository::new();
        tokens
            .expect_delete_for_user()
            .withf(|id| *id == 1)
            .times(1)
            .returning(|_| Ok(0));

        let revoked = service(MockUserRepository::new(), tokens)
            .revoke_all(1)
            .await
            .unwrap();

        assert_eq!(revoked, 0);
    }

    #[test]
    fn test_hash_secret_secret_matters() {
        let a = TokenService::new(
            Arc::new(MockUserRepository::new()),
            Arc::new(MockTokenRepository::new()),
            "secret-a".to_string(),
        );
        let b = TokenService::new(
            Arc::new(MockUserRepository::new()),
            Arc::new(MockTokenRepository::new()),
            "secret-b".to_string(),
        );

        assert_eq!(a.hash_secret("token"), a.hash_secret("token"));
        assert_ne!(a.hash_secret("token"), b.hash_secret("token"));
    }
}
