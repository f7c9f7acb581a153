//! Handler for a task's activity feed.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Serialize;
use taskdeck_core::pagination::next_offset;
use taskdeck_core::types::DbId;
use taskdeck_db::models::activity::Activity;
use taskdeck_db::repositories::ActivityRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::PaginationParams;
use crate::state::AppState;

/// Response envelope for the activity list.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityListResponse {
    pub next_offset: Option<i64>,
    pub total_count: i64,
    pub results: Vec<Activity>,
}

/// GET /api/v1/projects/activity/{task_id}
///
/// A task's audit trail, newest first.
pub async fn list_by_task(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(task_id): Path<DbId>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<ActivityListResponse>> {
    let (limit, offset) = params.clamped();

    let (rows, total_count) = ActivityRepo::list_by_task(&state.pool, task_id, limit, offset).await?;
    if rows.is_empty() {
        return Err(AppError::NotFound("activity not found".into()));
    }

    Ok(Json(ActivityListResponse {
        next_offset: next_offset(offset, limit, total_count),
        total_count,
        results: rows,
    }))
}
