//! Handlers for project membership (bulk add, member list).

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use taskdeck_core::error::CoreError;
use taskdeck_core::pagination::{clamp_limit, clamp_offset, next_offset, normalize_search};
use taskdeck_core::roles::{PROJECT_ROLES, PROJECT_ROLE_DEVELOPER};
use taskdeck_core::types::DbId;
use taskdeck_db::models::project_member::{MemberListParams, MemberWithUser, ProjectMember};
use taskdeck_db::repositories::{ProjectMemberRepo, ProjectRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Request body for `POST /projects/members`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddMembersRequest {
    pub project_id: DbId,
    /// User ids to add.
    pub members: Vec<DbId>,
    /// Role within the project; defaults to `developer`.
    pub role: Option<String>,
}

/// Query parameters for `GET /projects/members/list`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberListQuery {
    pub project_id: DbId,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub search: Option<String>,
}

/// Response envelope for the member list.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberListResponse {
    pub next_offset: Option<i64>,
    pub total_count: i64,
    pub results: Vec<MemberWithUser>,
}

/// POST /api/v1/projects/members
///
/// Bulk-add users to a project. Existing memberships are silently skipped
/// (the `(userId, projectId)` uniqueness is enforced by the store); only
/// the successfully inserted rows are returned.
pub async fn add_members(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<AddMembersRequest>,
) -> AppResult<Json<Vec<ProjectMember>>> {
    let role = input
        .role
        .unwrap_or_else(|| PROJECT_ROLE_DEVELOPER.to_string());
    if !PROJECT_ROLES.contains(&role.as_str()) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "role must be one of: {}",
            PROJECT_ROLES.join(", ")
        ))));
    }

    ProjectRepo::find_by_id(&state.pool, input.project_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: input.project_id,
        }))?;

    let inserted =
        ProjectMemberRepo::bulk_add(&state.pool, input.project_id, &input.members, &role).await?;

    if inserted.len() < input.members.len() {
        tracing::warn!(
            project_id = input.project_id,
            requested = input.members.len(),
            inserted = inserted.len(),
            "Some members were not added due to duplicates"
        );
    }

    Ok(Json(inserted))
}

/// GET /api/v1/projects/members/list
///
/// List a project's members with user info, paginated; the search term
/// matches member name or email.
pub async fn list_members(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<MemberListQuery>,
) -> AppResult<Json<MemberListResponse>> {
    ProjectRepo::find_by_id(&state.pool, params.project_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: params.project_id,
        }))?;

    let limit = clamp_limit(params.limit);
    let offset = clamp_offset(params.offset);
    let list_params = MemberListParams {
        project_id: params.project_id,
        limit,
        offset,
        search: normalize_search(params.search.as_deref()),
    };

    let (rows, total_count) = ProjectMemberRepo::list(&state.pool, &list_params).await?;
    if rows.is_empty() {
        return Err(AppError::NotFound("members not found".into()));
    }

    Ok(Json(MemberListResponse {
        next_offset: next_offset(offset, limit, total_count),
        total_count,
        results: rows.into_iter().map(Into::into).collect(),
    }))
}
