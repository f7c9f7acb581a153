//! Repository for the `tasks` table.

use sqlx::PgPool;
use taskdeck_core::types::DbId;

use crate::models::task::{CreateTask, Task, TaskListParams, TaskListRow, UpdateTask};
use crate::repositories::filter::{bind_values, bind_values_scalar, BindValue, QueryFilter};

/// Column list shared across single-row queries to avoid repetition.
const COLUMNS: &str = "id, title, description, status, priority, start_date, end_date, \
                       project_id, assignee, labels, created_at, updated_at";

/// Column list for the list query, with the assignee joined in.
const LIST_COLUMNS: &str = "t.id, t.title, t.description, t.status, t.priority, \
                            t.start_date, t.end_date, t.project_id, t.labels, \
                            u.id AS assignee_id, u.name AS assignee_name, \
                            u.email AS assignee_email, t.created_at, t.updated_at";

/// Provides CRUD and list operations for tasks.
pub struct TaskRepo;

impl TaskRepo {
    /// Insert a new task under a project, returning the created row.
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        input: &CreateTask,
    ) -> Result<Task, sqlx::Error> {
        let query = format!(
            "INSERT INTO tasks \
                 (title, description, status, priority, start_date, end_date, \
                  project_id, assignee, labels)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.status)
            .bind(&input.priority)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(project_id)
            .bind(input.assignee)
            .bind(&input.labels)
            .fetch_one(pool)
            .await
    }

    /// Find a task by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE id = $1");
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a task with its assignee resolved, for the details endpoint.
    pub async fn find_with_assignee(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<TaskListRow>, sqlx::Error> {
        let query = format!(
            "SELECT {LIST_COLUMNS} FROM tasks t \
             LEFT JOIN users u ON u.id = t.assignee \
             WHERE t.id = $1"
        );
        sqlx::query_as::<_, TaskListRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List tasks in a project with filtering and pagination.
    ///
    /// Returns the page (assignees joined in) plus the total count of
    /// matching rows.
    pub async fn list(
        pool: &PgPool,
        params: &TaskListParams,
    ) -> Result<(Vec<TaskListRow>, i64), sqlx::Error> {
        let filter = build_task_filter(params);
        let where_clause = filter.where_clause();
        let limit_idx = filter.next_bind_index();
        let offset_idx = limit_idx + 1;

        let query = format!(
            "SELECT {LIST_COLUMNS} FROM tasks t \
             LEFT JOIN users u ON u.id = t.assignee \
             {where_clause} \
             ORDER BY t.created_at DESC \
             LIMIT ${limit_idx} OFFSET ${offset_idx}"
        );

        let rows = bind_values(sqlx::query_as::<_, TaskListRow>(&query), filter.binds())
            .bind(params.limit)
            .bind(params.offset)
            .fetch_all(pool)
            .await?;

        let count_query = format!("SELECT COUNT(*)::BIGINT FROM tasks t {where_clause}");
        let total = bind_values_scalar(sqlx::query_scalar::<_, i64>(&count_query), filter.binds())
            .fetch_one(pool)
            .await?;

        Ok((rows, total))
    }

    /// Update a task. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTask,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!(
            "UPDATE tasks SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                status = COALESCE($4, status),
                priority = COALESCE($5, priority),
                start_date = COALESCE($6, start_date),
                end_date = COALESCE($7, end_date),
                assignee = COALESCE($8, assignee),
                labels = COALESCE($9, labels),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.status)
            .bind(&input.priority)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(input.assignee)
            .bind(&input.labels)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a task by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Build the WHERE clause for the task list from filter parameters.
fn build_task_filter(params: &TaskListParams) -> QueryFilter {
    let mut filter = QueryFilter::new();

    filter.eq("t.project_id", BindValue::BigInt(params.project_id));
    if let Some(ref status) = params.status {
        filter.eq("t.status", BindValue::Text(status.clone()));
    }
    if let Some(ref priority) = params.priority {
        filter.eq("t.priority", BindValue::Text(priority.clone()));
    }
    if let Some(ref search) = params.search {
        filter.ilike_any(&["t.title"], search);
    }

    filter
}
