//! Repository for the `projects` table.
//!
//! The list query joins task counts per project at query time (never
//! denormalized) and computes the completion percentage in Rust.

use sqlx::{FromRow, PgPool};
use taskdeck_core::types::{DbId, Timestamp};

use crate::models::project::{
    CreateProject, Project, ProjectListParams, ProjectWithProgress, TasksCount, UpdateProject,
};
use crate::repositories::filter::{bind_values, bind_values_scalar, BindValue, QueryFilter};

/// Column list shared across single-row queries to avoid repetition.
const COLUMNS: &str =
    "id, name, description, status, priority, start_date, end_date, created_at, updated_at";

/// Flat row for the list query, with task aggregates joined in.
#[derive(Debug, FromRow)]
struct ProjectListRow {
    id: DbId,
    name: String,
    description: String,
    status: String,
    priority: String,
    start_date: chrono::NaiveDate,
    end_date: Option<chrono::NaiveDate>,
    created_at: Timestamp,
    updated_at: Timestamp,
    total_tasks: i64,
    completed_tasks: i64,
}

impl From<ProjectListRow> for ProjectWithProgress {
    fn from(r: ProjectListRow) -> Self {
        let progress = if r.total_tasks == 0 {
            0.0
        } else {
            (r.completed_tasks as f64 / r.total_tasks as f64) * 100.0
        };
        ProjectWithProgress {
            project: Project {
                id: r.id,
                name: r.name,
                description: r.description,
                status: r.status,
                priority: r.priority,
                start_date: r.start_date,
                end_date: r.end_date,
                created_at: r.created_at,
                updated_at: r.updated_at,
            },
            tasks_count: TasksCount {
                total: r.total_tasks,
                completed: r.completed_tasks,
            },
            progress,
        }
    }
}

/// Provides CRUD and list operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateProject) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (name, description, status, priority, start_date, end_date)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.status)
            .bind(&input.priority)
            .bind(input.start_date)
            .bind(input.end_date)
            .fetch_one(pool)
            .await
    }

    /// Find a project by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a project by name, case-insensitively.
    ///
    /// This backs the application-level duplicate-name check on create;
    /// there is intentionally no unique index behind it.
    pub async fn find_by_name_ci(
        pool: &PgPool,
        name: &str,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE lower(name) = lower($1)");
        sqlx::query_as::<_, Project>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// List projects with filtering, pagination, and task-count aggregates.
    ///
    /// Returns the page plus the total count of matching rows. When
    /// `params.member_id` is set, results are restricted to projects where
    /// that user holds a membership row.
    pub async fn list(
        pool: &PgPool,
        params: &ProjectListParams,
    ) -> Result<(Vec<ProjectWithProgress>, i64), sqlx::Error> {
        let filter = build_project_filter(params);
        let where_clause = filter.where_clause();
        let limit_idx = filter.next_bind_index();
        let offset_idx = limit_idx + 1;

        let query = format!(
            "SELECT p.id, p.name, p.description, p.status, p.priority, \
                    p.start_date, p.end_date, p.created_at, p.updated_at, \
                    COUNT(t.id) AS total_tasks, \
                    COUNT(t.id) FILTER (WHERE t.status = 'done') AS completed_tasks \
             FROM projects p \
             LEFT JOIN tasks t ON t.project_id = p.id \
             {where_clause} \
             GROUP BY p.id \
             ORDER BY p.created_at DESC \
             LIMIT ${limit_idx} OFFSET ${offset_idx}"
        );

        let rows = bind_values(sqlx::query_as::<_, ProjectListRow>(&query), filter.binds())
            .bind(params.limit)
            .bind(params.offset)
            .fetch_all(pool)
            .await?;

        let count_query =
            format!("SELECT COUNT(*)::BIGINT FROM projects p {where_clause}");
        let total = bind_values_scalar(sqlx::query_scalar::<_, i64>(&count_query), filter.binds())
            .fetch_one(pool)
            .await?;

        Ok((rows.into_iter().map(Into::into).collect(), total))
    }

    /// Update a project. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                status = COALESCE($4, status),
                priority = COALESCE($5, priority),
                start_date = COALESCE($6, start_date),
                end_date = COALESCE($7, end_date),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.status)
            .bind(&input.priority)
            .bind(input.start_date)
            .bind(input.end_date)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a project by ID. Tasks, memberships, comments,
    /// and activity rows go with it via FK cascades. Returns `true` if a
    /// row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Build the WHERE clause for the project list from filter parameters.
fn build_project_filter(params: &ProjectListParams) -> QueryFilter {
    let mut filter = QueryFilter::new();

    if let Some(ref status) = params.status {
        filter.eq("p.status", BindValue::Text(status.clone()));
    }
    if let Some(ref priority) = params.priority {
        filter.eq("p.priority", BindValue::Text(priority.clone()));
    }
    if let Some(ref search) = params.search {
        filter.ilike_any(&["p.name"], search);
    }
    if let Some(member_id) = params.member_id {
        filter.condition_with(BindValue::BigInt(member_id), |idx| {
            format!(
                "EXISTS (SELECT 1 FROM project_members m \
                 WHERE m.project_id = p.id AND m.user_id = ${idx})"
            )
        });
    }

    filter
}
