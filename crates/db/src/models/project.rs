//! Project entity model and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use taskdeck_core::types::{DbId, Timestamp};

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub status: String,
    pub priority: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Per-project task totals joined in at query time.
#[derive(Debug, Clone, Serialize)]
pub struct TasksCount {
    pub total: i64,
    pub completed: i64,
}

/// A project list row augmented with completion tracking.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectWithProgress {
    #[serde(flatten)]
    pub project: Project,
    pub tasks_count: TasksCount,
    /// Completion percentage: `completed / total * 100`, 0 when no tasks.
    pub progress: f64,
}

/// DTO for creating a new project. Shape validation happens in the handler
/// before this reaches the repository.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProject {
    pub name: String,
    pub description: String,
    pub status: String,
    pub priority: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

/// DTO for updating an existing project. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProject {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Filter parameters for the project list.
#[derive(Debug, Clone)]
pub struct ProjectListParams {
    pub limit: i64,
    pub offset: i64,
    /// Normalized search term (trimmed, never empty).
    pub search: Option<String>,
    /// Exact status, or `None` for the `"all"` sentinel.
    pub status: Option<String>,
    /// Exact priority, or `None` for the `"all"` sentinel.
    pub priority: Option<String>,
    /// When set, restrict to projects where this user holds a membership row.
    pub member_id: Option<DbId>,
}
