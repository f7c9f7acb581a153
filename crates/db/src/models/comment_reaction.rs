//! Comment reaction entity and toggle DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use taskdeck_core::types::{DbId, Timestamp};

/// A reaction row from the `comment_reactions` table. At most one row per
/// `(comment_id, user_id)` pair.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentReaction {
    pub id: DbId,
    pub comment_id: DbId,
    pub user_id: DbId,
    pub reaction: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A reaction resolved to its reactor's display info.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactionWithUser {
    pub id: DbId,
    pub comment_id: DbId,
    pub reaction: String,
    pub user_id: DbId,
    pub name: String,
    pub email: String,
}

/// Request body for the reaction toggle.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleReaction {
    pub comment_id: DbId,
    pub reaction: String,
}

/// Outcome of a reaction toggle, reported back to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionAction {
    Added,
    Updated,
    Deleted,
}
