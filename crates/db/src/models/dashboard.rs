//! Dashboard rollup shapes. All values are computed fresh per request.

use serde::Serialize;
use sqlx::FromRow;
use taskdeck_core::types::{DbId, Timestamp};

/// Member head-counts for the overview widget.
#[derive(Debug, Clone, Serialize)]
pub struct MemberCounts {
    pub total: i64,
    pub active: i64,
    pub inactive: i64,
}

/// Project head-counts for the overview widget.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectCounts {
    pub total: i64,
    pub active: i64,
    pub completed: i64,
}

/// Task counts per status for the overview widget.
#[derive(Debug, Clone, Serialize)]
pub struct TaskCounts {
    pub total: i64,
    pub todo: i64,
    pub progress: i64,
    pub review: i64,
    pub done: i64,
}

/// A project ranked by completion ratio.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectProgressEntry {
    pub id: DbId,
    pub name: String,
    pub progress: f64,
}

/// A recent-member row for the overview widget.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentMember {
    pub id: DbId,
    pub name: String,
    pub role: String,
    pub created_at: Timestamp,
}

/// Filters for the chart endpoint. Members are scoped to their own tasks
/// via `assignee_id`; admins pass `None`.
#[derive(Debug, Clone, Default)]
pub struct ChartParams {
    pub start_date: Option<chrono::NaiveDate>,
    pub end_date: Option<chrono::NaiveDate>,
    pub project_id: Option<DbId>,
    pub assignee_id: Option<DbId>,
}

/// Per-status task histogram.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StatusHistogram {
    pub todo: i64,
    pub in_progress: i64,
    pub in_review: i64,
    pub done: i64,
}

/// Per-priority task histogram.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PriorityHistogram {
    pub low: i64,
    pub medium: i64,
    pub high: i64,
    pub urgent: i64,
}

/// Chart rollup: totals, progress, histograms, and distinct assignees,
/// scoped to one project when `project_id` was given.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    pub project_name: Option<String>,
    pub total_projects: i64,
    pub total_tasks: i64,
    pub completed_tasks: i64,
    pub pending_tasks: i64,
    pub progress: f64,
    pub task_by_status: StatusHistogram,
    pub task_by_priority: PriorityHistogram,
    pub total_members: i64,
}
