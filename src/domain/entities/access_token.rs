//! Access token entity.

use chrono::{DateTime, Utc};

/// A bearer token issued to a user.
///
/// Only the keyed hash of the secret is stored; the plaintext is returned once
/// at issuance and cannot be recovered from this record.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AccessToken {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub token_hash: String,
    pub created_at: DateTime<Utc>,
    pub last_used_at: Option<DateTime<Utc>>,
}

/// Input data for storing a freshly issued token.
#[derive(Debug, Clone)]
pub struct NewAccessToken {
    pub user_id: i64,
    pub name: String,
    pub token_hash: String,
}
