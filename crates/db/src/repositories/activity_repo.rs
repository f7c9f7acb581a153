//! Repository for the append-only `activities` audit trail.

use sqlx::PgPool;
use taskdeck_core::types::DbId;

use crate::models::activity::{Activity, CreateActivity};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, task_id, action, key, previous_value, new_value, \
                       message, performed_by, user_id, created_at";

/// Column list for INSERT (excludes auto-generated `id` and `created_at`).
const INSERT_COLUMNS: &str =
    "task_id, action, key, previous_value, new_value, message, performed_by, user_id";

/// Number of bound parameters per inserted row.
const BIND_COUNT: u32 = 8;

/// Provides append and query operations for activity rows.
pub struct ActivityRepo;

impl ActivityRepo {
    /// Append a single activity row.
    pub async fn append(pool: &PgPool, entry: &CreateActivity) -> Result<Activity, sqlx::Error> {
        let query = format!(
            "INSERT INTO activities ({INSERT_COLUMNS})
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Activity>(&query)
            .bind(entry.task_id)
            .bind(&entry.action)
            .bind(&entry.key)
            .bind(&entry.previous_value)
            .bind(&entry.new_value)
            .bind(&entry.message)
            .bind(&entry.performed_by)
            .bind(entry.user_id)
            .fetch_one(pool)
            .await
    }

    /// Append multiple activity rows with a single multi-row INSERT.
    pub async fn append_all(
        pool: &PgPool,
        entries: &[CreateActivity],
    ) -> Result<Vec<Activity>, sqlx::Error> {
        if entries.is_empty() {
            return Ok(Vec::new());
        }

        let mut query = format!("INSERT INTO activities ({INSERT_COLUMNS}) VALUES ");
        let mut param_idx = 1u32;
        for row in 0..entries.len() {
            if row > 0 {
                query.push_str(", ");
            }
            query.push('(');
            for i in 0..BIND_COUNT {
                if i > 0 {
                    query.push_str(", ");
                }
                query.push_str(&format!("${param_idx}"));
                param_idx += 1;
            }
            query.push(')');
        }
        query.push_str(&format!(" RETURNING {COLUMNS}"));

        let mut q = sqlx::query_as::<_, Activity>(&query);
        for entry in entries {
            q = q
                .bind(entry.task_id)
                .bind(&entry.action)
                .bind(&entry.key)
                .bind(&entry.previous_value)
                .bind(&entry.new_value)
                .bind(&entry.message)
                .bind(&entry.performed_by)
                .bind(entry.user_id);
        }

        q.fetch_all(pool).await
    }

    /// List a task's activity, newest first, with pagination.
    pub async fn list_by_task(
        pool: &PgPool,
        task_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Activity>, i64), sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM activities \
             WHERE task_id = $1 \
             ORDER BY created_at DESC \
             LIMIT $2 OFFSET $3"
        );
        let rows = sqlx::query_as::<_, Activity>(&query)
            .bind(task_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?;

        let total =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*)::BIGINT FROM activities WHERE task_id = $1")
                .bind(task_id)
                .fetch_one(pool)
                .await?;

        Ok((rows, total))
    }

    /// The `n` most recent activity rows across all tasks.
    pub async fn recent(pool: &PgPool, n: i64) -> Result<Vec<Activity>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM activities ORDER BY created_at DESC LIMIT $1"
        );
        sqlx::query_as::<_, Activity>(&query)
            .bind(n)
            .fetch_all(pool)
            .await
    }
}
