//! Repository for the `comment_reactions` table.
//!
//! Reactions are single-slot per (comment, user); the toggle semantics
//! (insert / update / delete) live in the comment handler, built on the
//! primitive operations here.

use sqlx::PgPool;
use taskdeck_core::types::DbId;

use crate::models::comment_reaction::{CommentReaction, ReactionWithUser};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, comment_id, user_id, reaction, created_at, updated_at";

/// Column list for reactor-resolved queries.
const USER_COLUMNS: &str = "r.id, r.comment_id, r.reaction, \
                            u.id AS user_id, u.name, u.email";

/// Provides reaction operations for comments.
pub struct CommentReactionRepo;

impl CommentReactionRepo {
    /// Find the acting user's reaction on a comment, if any.
    pub async fn find_by_comment_and_user(
        pool: &PgPool,
        comment_id: DbId,
        user_id: DbId,
    ) -> Result<Option<CommentReaction>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM comment_reactions WHERE comment_id = $1 AND user_id = $2");
        sqlx::query_as::<_, CommentReaction>(&query)
            .bind(comment_id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a new reaction row.
    pub async fn create(
        pool: &PgPool,
        comment_id: DbId,
        user_id: DbId,
        reaction: &str,
    ) -> Result<CommentReaction, sqlx::Error> {
        let query = format!(
            "INSERT INTO comment_reactions (comment_id, user_id, reaction)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CommentReaction>(&query)
            .bind(comment_id)
            .bind(user_id)
            .bind(reaction)
            .fetch_one(pool)
            .await
    }

    /// Overwrite an existing reaction row with a different symbol.
    pub async fn update_reaction(
        pool: &PgPool,
        id: DbId,
        reaction: &str,
    ) -> Result<Option<CommentReaction>, sqlx::Error> {
        let query = format!(
            "UPDATE comment_reactions SET reaction = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CommentReaction>(&query)
            .bind(id)
            .bind(reaction)
            .fetch_optional(pool)
            .await
    }

    /// Remove the acting user's reaction from a comment (toggle-off).
    /// Returns `true` if a row was removed.
    pub async fn delete_by_comment_and_user(
        pool: &PgPool,
        comment_id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM comment_reactions WHERE comment_id = $1 AND user_id = $2")
                .bind(comment_id)
                .bind(user_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// All reactions for a set of comments, reactors resolved, oldest first
    /// within each comment. Used to enrich a comment-list page in one query.
    pub async fn list_for_comments(
        pool: &PgPool,
        comment_ids: &[DbId],
    ) -> Result<Vec<ReactionWithUser>, sqlx::Error> {
        if comment_ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!(
            "SELECT {USER_COLUMNS} FROM comment_reactions r \
             JOIN users u ON u.id = r.user_id \
             WHERE r.comment_id = ANY($1) \
             ORDER BY r.comment_id, r.created_at ASC"
        );
        sqlx::query_as::<_, ReactionWithUser>(&query)
            .bind(comment_ids)
            .fetch_all(pool)
            .await
    }

    /// List a comment's reactions, newest first, with pagination.
    pub async fn list_by_comment(
        pool: &PgPool,
        comment_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<ReactionWithUser>, i64), sqlx::Error> {
        let query = format!(
            "SELECT {USER_COLUMNS} FROM comment_reactions r \
             JOIN users u ON u.id = r.user_id \
             WHERE r.comment_id = $1 \
             ORDER BY r.updated_at DESC \
             LIMIT $2 OFFSET $3"
        );
        let rows = sqlx::query_as::<_, ReactionWithUser>(&query)
            .bind(comment_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?;

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*)::BIGINT FROM comment_reactions WHERE comment_id = $1",
        )
        .bind(comment_id)
        .fetch_one(pool)
        .await?;

        Ok((rows, total))
    }
}
