//! Handler for the global label catalog listing.

use axum::extract::{Query, State};
use axum::Json;
use serde::Serialize;
use taskdeck_core::pagination::next_offset;
use taskdeck_db::models::label::{Label, LabelListParams};
use taskdeck_db::repositories::LabelRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::ListParams;
use crate::state::AppState;

/// Response envelope for the label list.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelListResponse {
    pub next_offset: Option<i64>,
    pub total_count: i64,
    pub results: Vec<Label>,
}

/// GET /api/v1/projects/labels/list
pub async fn list(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<LabelListResponse>> {
    let (limit, offset) = params.clamped();
    let list_params = LabelListParams {
        limit,
        offset,
        search: params.search(),
    };

    let (rows, total_count) = LabelRepo::list(&state.pool, &list_params).await?;
    if rows.is_empty() {
        return Err(AppError::NotFound("labels not found".into()));
    }

    Ok(Json(LabelListResponse {
        next_offset: next_offset(offset, limit, total_count),
        total_count,
        results: rows,
    }))
}
