//! Handlers for the `/projects` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use taskdeck_core::error::CoreError;
use taskdeck_core::pagination::next_offset;
use taskdeck_core::status::{Priority, ProjectStatus};
use taskdeck_core::types::DbId;
use taskdeck_db::models::project::{
    CreateProject, Project, ProjectListParams, ProjectWithProgress, UpdateProject,
};
use taskdeck_db::repositories::ProjectRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::query::ListParams;
use crate::state::AppState;

/// Response envelope for the project list.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectListResponse {
    pub next_offset: Option<i64>,
    pub total_count: i64,
    pub projects: Vec<ProjectWithProgress>,
}

/// POST /api/v1/projects
///
/// Create a project (admin only). The duplicate-name check is a
/// case-insensitive lookup before insert; there is deliberately no unique
/// index behind it, so concurrent creates of the same name can both land.
pub async fn create(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateProject>,
) -> AppResult<(StatusCode, Json<Project>)> {
    validate_create(&input)?;

    if ProjectRepo::find_by_name_ci(&state.pool, &input.name)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "Project already exists".into(),
        )));
    }

    let project = ProjectRepo::create(&state.pool, &input).await?;
    tracing::info!(project_id = project.id, name = %project.name, "Project created");
    Ok((StatusCode::CREATED, Json(project)))
}

/// GET /api/v1/projects
///
/// List projects with filtering, pagination, and per-project task counts.
/// Admins see every project; members only see projects they belong to.
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<ProjectListResponse>> {
    let (limit, offset) = params.clamped();
    let member_id = if auth.is_admin() {
        None
    } else {
        Some(auth.user_id)
    };

    let list_params = ProjectListParams {
        limit,
        offset,
        search: params.search(),
        status: params.status_filter(|s| ProjectStatus::parse(s).map(ProjectStatus::as_str))?,
        priority: params.priority_filter()?,
        member_id,
    };

    let (projects, total_count) = ProjectRepo::list(&state.pool, &list_params).await?;
    if projects.is_empty() {
        return Err(AppError::NotFound("projects not found".into()));
    }

    Ok(Json(ProjectListResponse {
        next_offset: next_offset(offset, limit, total_count),
        total_count,
        projects,
    }))
}

/// GET /api/v1/projects/{id}
pub async fn get_by_id(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Project>> {
    let project = ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    Ok(Json(project))
}

/// PUT /api/v1/projects/{id}
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProject>,
) -> AppResult<Json<Project>> {
    validate_update(&input)?;

    let project = ProjectRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    Ok(Json(project))
}

/// DELETE /api/v1/projects/{id}
///
/// Hard-deletes the project; tasks, memberships, comments, and activity
/// rows go with it via FK cascades.
pub async fn delete(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<serde_json::Value>> {
    let deleted = ProjectRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }));
    }
    Ok(Json(
        serde_json::json!({ "message": "Project deleted successfully" }),
    ))
}

/// Request-shape validation for project creation.
fn validate_create(input: &CreateProject) -> Result<(), AppError> {
    let mut errors = Vec::new();
    if input.name.trim().len() < 3 || input.name.len() > 100 {
        errors.push("name must be 3-100 characters");
    }
    if input.description.len() < 4 || input.description.len() > 500 {
        errors.push("description must be 4-500 characters");
    }
    if ProjectStatus::parse(&input.status).is_none() {
        errors.push("status must be one of: active, completed, hold, archived");
    }
    if Priority::parse(&input.priority).is_none() {
        errors.push("priority must be one of: low, medium, high, urgent");
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::Validation(errors.join("; "))))
    }
}

/// Request-shape validation for project updates.
fn validate_update(input: &UpdateProject) -> Result<(), AppError> {
    let mut errors = Vec::new();
    if let Some(ref name) = input.name {
        if name.trim().len() < 3 || name.len() > 100 {
            errors.push("name must be 3-100 characters");
        }
    }
    if let Some(ref description) = input.description {
        if description.len() < 4 || description.len() > 500 {
            errors.push("description must be 4-500 characters");
        }
    }
    if let Some(ref status) = input.status {
        if ProjectStatus::parse(status).is_none() {
            errors.push("status must be one of: active, completed, hold, archived");
        }
    }
    if let Some(ref priority) = input.priority {
        if Priority::parse(priority).is_none() {
            errors.push("priority must be one of: low, medium, high, urgent");
        }
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::Validation(errors.join("; "))))
    }
}
