//! Task entity model and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use taskdeck_core::types::{DbId, Timestamp};

use crate::models::user::UserInfo;

/// A task row from the `tasks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub priority: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub project_id: DbId,
    pub assignee: Option<DbId>,
    pub labels: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Flat row for the task list query (assignee joined in).
#[derive(Debug, Clone, FromRow)]
pub struct TaskListRow {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub priority: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub project_id: DbId,
    pub labels: Vec<String>,
    pub assignee_id: Option<DbId>,
    pub assignee_name: Option<String>,
    pub assignee_email: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A task with its assignee resolved to `{id, name, email}`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskWithAssignee {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub priority: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub project_id: DbId,
    pub labels: Vec<String>,
    pub assignee: Option<UserInfo>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<TaskListRow> for TaskWithAssignee {
    fn from(r: TaskListRow) -> Self {
        let assignee = match (r.assignee_id, r.assignee_name, r.assignee_email) {
            (Some(id), Some(name), Some(email)) => Some(UserInfo { id, name, email }),
            _ => None,
        };
        TaskWithAssignee {
            id: r.id,
            title: r.title,
            description: r.description,
            status: r.status,
            priority: r.priority,
            start_date: r.start_date,
            end_date: r.end_date,
            project_id: r.project_id,
            labels: r.labels,
            assignee,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// DTO for creating a new task under a project.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTask {
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub priority: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub assignee: Option<DbId>,
    #[serde(default)]
    pub labels: Vec<String>,
}

/// DTO for a partial task update. Every present field is applied and audited.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTask {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub assignee: Option<DbId>,
    pub labels: Option<Vec<String>>,
}

/// Filter parameters for the task list, scoped to one project.
#[derive(Debug, Clone)]
pub struct TaskListParams {
    pub project_id: DbId,
    pub limit: i64,
    pub offset: i64,
    /// Normalized search term (trimmed, never empty).
    pub search: Option<String>,
    /// Exact status, or `None` for the `"all"` sentinel.
    pub status: Option<String>,
    /// Exact priority, or `None` for the `"all"` sentinel.
    pub priority: Option<String>,
}
