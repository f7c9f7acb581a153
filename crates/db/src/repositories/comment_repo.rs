//! Repository for the `comments` table.

use sqlx::PgPool;
use taskdeck_core::types::DbId;

use crate::models::comment::{Comment, CommentListRow};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, task_id, user_id, body, is_edited, created_at, updated_at";

/// Column list for the list query, with the author joined in.
const LIST_COLUMNS: &str = "c.id, c.task_id, c.body, c.is_edited, c.created_at, \
                            u.id AS author_id, u.name AS author_name, u.email AS author_email";

/// Provides CRUD operations for comments.
pub struct CommentRepo;

impl CommentRepo {
    /// Insert a new comment, returning the created row.
    pub async fn create(
        pool: &PgPool,
        task_id: DbId,
        user_id: DbId,
        body: &str,
    ) -> Result<Comment, sqlx::Error> {
        let query = format!(
            "INSERT INTO comments (task_id, user_id, body)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(task_id)
            .bind(user_id)
            .bind(body)
            .fetch_one(pool)
            .await
    }

    /// Find a comment by ID with its author joined in.
    pub async fn find_with_author(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<CommentListRow>, sqlx::Error> {
        let query = format!(
            "SELECT {LIST_COLUMNS} FROM comments c \
             JOIN users u ON u.id = c.user_id \
             WHERE c.id = $1"
        );
        sqlx::query_as::<_, CommentListRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a task's comments, newest first, with pagination.
    ///
    /// Returns the page (authors joined in) plus the total comment count.
    pub async fn list_by_task(
        pool: &PgPool,
        task_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<CommentListRow>, i64), sqlx::Error> {
        let query = format!(
            "SELECT {LIST_COLUMNS} FROM comments c \
             JOIN users u ON u.id = c.user_id \
             WHERE c.task_id = $1 \
             ORDER BY c.created_at DESC \
             LIMIT $2 OFFSET $3"
        );
        let rows = sqlx::query_as::<_, CommentListRow>(&query)
            .bind(task_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?;

        let total =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*)::BIGINT FROM comments WHERE task_id = $1")
                .bind(task_id)
                .fetch_one(pool)
                .await?;

        Ok((rows, total))
    }

    /// Replace a comment's body and mark it edited.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_body(
        pool: &PgPool,
        id: DbId,
        body: &str,
    ) -> Result<Option<Comment>, sqlx::Error> {
        let query = format!(
            "UPDATE comments SET body = $2, is_edited = TRUE, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(id)
            .bind(body)
            .fetch_optional(pool)
            .await
    }

    /// Hard-delete a comment. Its reactions cascade-delete with it.
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
