//! Handlers for the dashboard overview and chart endpoints.
//!
//! All rollups are computed fresh per request; there is no caching or
//! incremental maintenance.

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use taskdeck_core::types::DbId;
use taskdeck_db::models::activity::Activity;
use taskdeck_db::models::dashboard::{
    ChartData, ChartParams, MemberCounts, ProjectCounts, ProjectProgressEntry, RecentMember,
    TaskCounts,
};
use taskdeck_db::models::task::Task;
use taskdeck_db::repositories::DashboardRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// Top-N size for the project progress ranking.
const TOP_PROJECTS: i64 = 5;

/// Row count for the recent-item widgets.
const RECENT_ITEMS: i64 = 3;

/// Combined counts for `GET /dashboard/overview`.
#[derive(Debug, Serialize)]
pub struct OverviewResponse {
    pub members: MemberCounts,
    pub projects: ProjectCounts,
    pub tasks: TaskCounts,
}

/// Query parameters for `GET /dashboard/overview/chart`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartQuery {
    pub start_date: Option<chrono::NaiveDate>,
    pub end_date: Option<chrono::NaiveDate>,
    pub project_id: Option<DbId>,
}

/// GET /api/v1/dashboard/overview
///
/// Member/project/task head-counts.
pub async fn overview(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<OverviewResponse>> {
    let (members, projects, tasks) = tokio::try_join!(
        DashboardRepo::member_counts(&state.pool),
        DashboardRepo::project_counts(&state.pool),
        DashboardRepo::task_counts(&state.pool),
    )?;

    Ok(Json(OverviewResponse {
        members,
        projects,
        tasks,
    }))
}

/// GET /api/v1/dashboard/overview/project
///
/// Top projects by completion ratio.
pub async fn project_overview(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<ProjectProgressEntry>>> {
    let projects = DashboardRepo::top_projects_by_progress(&state.pool, TOP_PROJECTS).await?;
    Ok(Json(projects))
}

/// GET /api/v1/dashboard/overview/task
///
/// Most recently created tasks.
pub async fn recent_tasks(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Task>>> {
    let tasks = DashboardRepo::recent_tasks(&state.pool, RECENT_ITEMS).await?;
    Ok(Json(tasks))
}

/// GET /api/v1/dashboard/overview/member
///
/// Most recently added members.
pub async fn recent_members(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<RecentMember>>> {
    let members = DashboardRepo::recent_members(&state.pool, RECENT_ITEMS).await?;
    Ok(Json(members))
}

/// GET /api/v1/dashboard/overview/activity
///
/// Most recent audit rows across all tasks.
pub async fn recent_activity(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Activity>>> {
    let activity = DashboardRepo::recent_activity(&state.pool, RECENT_ITEMS).await?;
    Ok(Json(activity))
}

/// GET /api/v1/dashboard/overview/chart
///
/// Parameterized chart rollup. Admins see everything; members are scoped
/// to tasks assigned to them.
pub async fn chart(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ChartQuery>,
) -> AppResult<Json<ChartData>> {
    let assignee_id = if auth.is_admin() {
        None
    } else {
        Some(auth.user_id)
    };

    let chart_params = ChartParams {
        start_date: params.start_date,
        end_date: params.end_date,
        project_id: params.project_id,
        assignee_id,
    };

    let data = DashboardRepo::chart_data(&state.pool, &chart_params).await?;
    Ok(Json(data))
}
