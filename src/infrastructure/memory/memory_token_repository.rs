//! In-memory implementation of token repository.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::domain::entities::{AccessToken, NewAccessToken};
use crate::domain::repositories::TokenRepository;
use crate::error::AppError;

#[derive(Default)]
struct State {
    next_id: i64,
    rows: BTreeMap<i64, AccessToken>,
}

/// Token repository backed by a map.
#[derive(Default)]
pub struct InMemoryTokenRepository {
    state: RwLock<State>,
}

impl InMemoryTokenRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TokenRepository for InMemoryTokenRepository {
    async fn create(&self, new_token: NewAccessToken) -> Result<AccessToken, AppError> {
        let mut state = self.state.write().await;

        if state.rows.values().any(|t| t.token_hash == new_token.token_hash) {
            return Err(AppError::internal("Token hash collision"));
        }

        state.next_id += 1;
        let token = AccessToken {
            id: state.next_id,
            user_id: new_token.user_id,
            name: new_token.name,
            token_hash: new_token.token_hash,
            created_at: Utc::now(),
            last_used_at: None,
        };
        state.rows.insert(token.id, token.clone());

        Ok(token)
    }

    async fn find_by_hash(&self, token_hash: &str) -> Result<Option<AccessToken>, AppError> {
        Ok(self
            .state
            .read()
            .await
            .rows
            .values()
            .find(|t| t.token_hash == token_hash)
            .cloned())
    }

    async fn touch(&self, id: i64) -> Result<(), AppError> {
        if let Some(token) = self.state.write().await.rows.get_mut(&id) {
            token.last_used_at = Some(Utc::now());
        }
        Ok(())
    }

    async fn delete_for_user(&self, user_id: i64) -> Result<u64, AppError> {
        let mut state = self.state.write().await;
        let before = state.rows.len();
        state.rows.retain(|_, t| t.user_id != user_id);
        Ok((before - state.rows.len()) as u64)
    }

    async fn count_for_user(&self, user_id: i64) -> Result<i64, AppError> {
        let count = self
            .state
            .read()
            .await
            .rows
            .values()
            .filter(|t| t.user_id == user_id)
            .count();
        Ok(count as i64)
    }
}
