//! Comment entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use taskdeck_core::types::{DbId, Timestamp};

use crate::models::comment_reaction::ReactionWithUser;
use crate::models::user::UserInfo;

/// A comment row from the `comments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: DbId,
    pub task_id: DbId,
    pub user_id: DbId,
    pub body: String,
    pub is_edited: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Flat row for the comment list query (author joined in).
#[derive(Debug, Clone, FromRow)]
pub struct CommentListRow {
    pub id: DbId,
    pub task_id: DbId,
    pub body: String,
    pub is_edited: bool,
    pub created_at: Timestamp,
    pub author_id: DbId,
    pub author_name: String,
    pub author_email: String,
}

/// A comment enriched with its author, the first 10 reactions, and the
/// full reaction count (distinct from the truncated list).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    pub id: DbId,
    pub task_id: DbId,
    pub body: String,
    pub is_edited: bool,
    pub created_at: Timestamp,
    pub user: UserInfo,
    pub reactions: Vec<ReactionWithUser>,
    pub total_reactions: i64,
}

/// Request body for adding a comment to a task.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddComment {
    pub task_id: DbId,
    pub comment: String,
}

/// Request body for editing a comment.
#[derive(Debug, Clone, Deserialize)]
pub struct EditComment {
    pub comment: String,
}
