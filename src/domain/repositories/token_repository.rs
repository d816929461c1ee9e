//! Repository trait for access tokens.

use crate::domain::entities::{AccessToken, NewAccessToken};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for issued access tokens.
///
/// Tokens are looked up by the keyed hash of their secret; the plaintext never
/// reaches this layer.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Stores a new token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors, including a hash collision.
    async fn create(&self, new_token: NewAccessToken) -> Result<AccessToken, AppError>;

    /// Finds a token by its hash.
    async fn find_by_hash(&self, token_hash: &str) -> Result<Option<AccessToken>, AppError>;

    /// Records that the token was just used.
    async fn touch(&self, id: i64) -> Result<(), AppError>;

    /// Deletes every token owned by `user_id`, returning how many were removed.
    ///
    /// Deleting zero tokens is not an error.
    async fn delete_for_user(&self, user_id: i64) -> Result<u64, AppError>;

    /// Counts tokens owned by `user_id`.
    async fn count_for_user(&self, user_id: i64) -> Result<i64, AppError>;
}
