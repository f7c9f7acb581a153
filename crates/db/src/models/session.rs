//! Refresh-token session entity.

use sqlx::FromRow;
use taskdeck_core::types::{DbId, Timestamp};

/// A session row from the `sessions` table. Never serialized to clients.
#[derive(Debug, Clone, FromRow)]
pub struct Session {
    pub id: DbId,
    pub user_id: DbId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
    pub revoked_at: Option<Timestamp>,
    pub created_at: Timestamp,
}
