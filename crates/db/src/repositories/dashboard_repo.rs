//! Read-only dashboard rollups, computed fresh per request.

use sqlx::{FromRow, PgPool};
use taskdeck_core::types::DbId;

use crate::models::activity::Activity;
use crate::models::dashboard::{
    ChartData, ChartParams, MemberCounts, PriorityHistogram, ProjectCounts, ProjectProgressEntry,
    RecentMember, StatusHistogram, TaskCounts,
};
use crate::models::task::Task;
use crate::repositories::filter::{bind_values, BindValue, QueryFilter};

#[derive(Debug, FromRow)]
struct MemberCountRow {
    active: i64,
    inactive: i64,
}

#[derive(Debug, FromRow)]
struct ProjectCountRow {
    total: i64,
    active: i64,
    completed: i64,
}

#[derive(Debug, FromRow)]
struct TaskCountRow {
    todo: i64,
    progress: i64,
    review: i64,
    done: i64,
}

#[derive(Debug, FromRow)]
struct ProgressRow {
    id: DbId,
    name: String,
    total_tasks: i64,
    completed_tasks: i64,
}

#[derive(Debug, FromRow)]
struct ChartRow {
    total_tasks: i64,
    completed_tasks: i64,
    todo: i64,
    in_progress: i64,
    in_review: i64,
    done: i64,
    low: i64,
    medium: i64,
    high: i64,
    urgent: i64,
    total_members: i64,
}

/// Provides aggregate queries for the dashboard endpoints.
pub struct DashboardRepo;

impl DashboardRepo {
    /// Active/inactive member head-counts (role `member`, not deleted).
    pub async fn member_counts(pool: &PgPool) -> Result<MemberCounts, sqlx::Error> {
        let row = sqlx::query_as::<_, MemberCountRow>(
            "SELECT COUNT(*) FILTER (WHERE status = 'active') AS active, \
                    COUNT(*) FILTER (WHERE status = 'inactive') AS inactive \
             FROM users \
             WHERE role = 'member' AND deleted_at IS NULL",
        )
        .fetch_one(pool)
        .await?;
        Ok(MemberCounts {
            total: row.active + row.inactive,
            active: row.active,
            inactive: row.inactive,
        })
    }

    /// Total/active/completed project head-counts.
    pub async fn project_counts(pool: &PgPool) -> Result<ProjectCounts, sqlx::Error> {
        let row = sqlx::query_as::<_, ProjectCountRow>(
            "SELECT COUNT(*) AS total, \
                    COUNT(*) FILTER (WHERE status = 'active') AS active, \
                    COUNT(*) FILTER (WHERE status = 'completed') AS completed \
             FROM projects",
        )
        .fetch_one(pool)
        .await?;
        Ok(ProjectCounts {
            total: row.total,
            active: row.active,
            completed: row.completed,
        })
    }

    /// Per-status task counts; total is the sum over the four statuses.
    pub async fn task_counts(pool: &PgPool) -> Result<TaskCounts, sqlx::Error> {
        let row = sqlx::query_as::<_, TaskCountRow>(
            "SELECT COUNT(*) FILTER (WHERE status = 'todo') AS todo, \
                    COUNT(*) FILTER (WHERE status = 'in_progress') AS progress, \
                    COUNT(*) FILTER (WHERE status = 'in_review') AS review, \
                    COUNT(*) FILTER (WHERE status = 'done') AS done \
             FROM tasks",
        )
        .fetch_one(pool)
        .await?;
        Ok(TaskCounts {
            total: row.todo + row.progress + row.review + row.done,
            todo: row.todo,
            progress: row.progress,
            review: row.review,
            done: row.done,
        })
    }

    /// Top `n` projects ranked by completion ratio.
    pub async fn top_projects_by_progress(
        pool: &PgPool,
        n: i64,
    ) -> Result<Vec<ProjectProgressEntry>, sqlx::Error> {
        let rows = sqlx::query_as::<_, ProgressRow>(
            "SELECT p.id, p.name, \
                    COUNT(t.id) AS total_tasks, \
                    COUNT(t.id) FILTER (WHERE t.status = 'done') AS completed_tasks \
             FROM projects p \
             LEFT JOIN tasks t ON t.project_id = p.id \
             GROUP BY p.id, p.name \
             ORDER BY CASE WHEN COUNT(t.id) = 0 THEN 0 \
                           ELSE COUNT(t.id) FILTER (WHERE t.status = 'done')::FLOAT8 \
                                / COUNT(t.id)::FLOAT8 END DESC \
             LIMIT $1",
        )
        .bind(n)
        .fetch_all(pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| {
                let progress = if r.total_tasks == 0 {
                    0.0
                } else {
                    (r.completed_tasks as f64 / r.total_tasks as f64) * 100.0
                };
                ProjectProgressEntry {
                    id: r.id,
                    name: r.name,
                    progress,
                }
            })
            .collect())
    }

    /// The `n` most recently created tasks.
    pub async fn recent_tasks(pool: &PgPool, n: i64) -> Result<Vec<Task>, sqlx::Error> {
        sqlx::query_as::<_, Task>(
            "SELECT id, title, description, status, priority, start_date, end_date, \
                    project_id, assignee, labels, created_at, updated_at \
             FROM tasks ORDER BY created_at DESC LIMIT $1",
        )
        .bind(n)
        .fetch_all(pool)
        .await
    }

    /// The `n` most recently added members.
    pub async fn recent_members(pool: &PgPool, n: i64) -> Result<Vec<RecentMember>, sqlx::Error> {
        sqlx::query_as::<_, RecentMember>(
            "SELECT id, name, role, created_at FROM users \
             WHERE role = 'member' AND deleted_at IS NULL \
             ORDER BY created_at DESC LIMIT $1",
        )
        .bind(n)
        .fetch_all(pool)
        .await
    }

    /// The `n` most recent activity rows across all tasks.
    pub async fn recent_activity(pool: &PgPool, n: i64) -> Result<Vec<Activity>, sqlx::Error> {
        sqlx::query_as::<_, Activity>(
            "SELECT id, task_id, action, key, previous_value, new_value, \
                    message, performed_by, user_id, created_at \
             FROM activities ORDER BY created_at DESC LIMIT $1",
        )
        .bind(n)
        .fetch_all(pool)
        .await
    }

    /// Chart rollup: task totals, histograms, and distinct assignees under
    /// the given date-range / project / assignee filters.
    pub async fn chart_data(pool: &PgPool, params: &ChartParams) -> Result<ChartData, sqlx::Error> {
        let mut filter = QueryFilter::new();
        if let Some(project_id) = params.project_id {
            filter.eq("t.project_id", BindValue::BigInt(project_id));
        }
        if let Some(assignee_id) = params.assignee_id {
            filter.eq("t.assignee", BindValue::BigInt(assignee_id));
        }
        if let Some(start) = params.start_date {
            filter.condition_with(BindValue::Date(start), |idx| {
                format!("t.created_at::DATE >= ${idx}")
            });
        }
        if let Some(end) = params.end_date {
            filter.condition_with(BindValue::Date(end), |idx| {
                format!("t.created_at::DATE <= ${idx}")
            });
        }

        let where_clause = filter.where_clause();
        let query = format!(
            "SELECT COUNT(t.id) AS total_tasks, \
                    COUNT(t.id) FILTER (WHERE t.status = 'done') AS completed_tasks, \
                    COUNT(t.id) FILTER (WHERE t.status = 'todo') AS todo, \
                    COUNT(t.id) FILTER (WHERE t.status = 'in_progress') AS in_progress, \
                    COUNT(t.id) FILTER (WHERE t.status = 'in_review') AS in_review, \
                    COUNT(t.id) FILTER (WHERE t.status = 'done') AS done, \
                    COUNT(t.id) FILTER (WHERE t.priority = 'low') AS low, \
                    COUNT(t.id) FILTER (WHERE t.priority = 'medium') AS medium, \
                    COUNT(t.id) FILTER (WHERE t.priority = 'high') AS high, \
                    COUNT(t.id) FILTER (WHERE t.priority = 'urgent') AS urgent, \
                    COUNT(DISTINCT t.assignee) AS total_members \
             FROM tasks t {where_clause}"
        );
        let row = bind_values(sqlx::query_as::<_, ChartRow>(&query), filter.binds())
            .fetch_one(pool)
            .await?;

        // Project scope context: the scoped project's name, or the count of
        // all projects when unscoped.
        let (project_name, total_projects) = match params.project_id {
            Some(project_id) => {
                let name =
                    sqlx::query_scalar::<_, String>("SELECT name FROM projects WHERE id = $1")
                        .bind(project_id)
                        .fetch_optional(pool)
                        .await?;
                let count = if name.is_some() { 1 } else { 0 };
                (name, count)
            }
            None => {
                let count =
                    sqlx::query_scalar::<_, i64>("SELECT COUNT(*)::BIGINT FROM projects")
                        .fetch_one(pool)
                        .await?;
                (None, count)
            }
        };

        let progress = if row.total_tasks == 0 {
            0.0
        } else {
            (row.completed_tasks as f64 / row.total_tasks as f64) * 100.0
        };

        Ok(ChartData {
            project_name,
            total_projects,
            total_tasks: row.total_tasks,
            completed_tasks: row.completed_tasks,
            pending_tasks: row.total_tasks - row.completed_tasks,
            progress,
            task_by_status: StatusHistogram {
                todo: row.todo,
                in_progress: row.in_progress,
                in_review: row.in_review,
                done: row.done,
            },
            task_by_priority: PriorityHistogram {
                low: row.low,
                medium: row.medium,
                high: row.high,
                urgent: row.urgent,
            },
            total_members: row.total_members,
        })
    }
}
