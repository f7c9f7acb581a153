//! Handlers for tasks: creation, listing, the kanban board, details, and
//! the audited partial update.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use taskdeck_core::activity::{display_labels, display_value, FieldChange, NA};
use taskdeck_core::error::CoreError;
use taskdeck_core::pagination::next_offset;
use taskdeck_core::status::{Priority, TaskStatus, FILTER_ALL};
use taskdeck_core::types::DbId;
use taskdeck_db::models::activity::CreateActivity;
use taskdeck_db::models::task::{
    CreateTask, Task, TaskListParams, TaskListRow, TaskWithAssignee, UpdateTask,
};
use taskdeck_db::repositories::{ActivityRepo, LabelRepo, ProjectRepo, TaskRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::ListParams;
use crate::state::AppState;

/// Response envelope for the task list.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskListResponse {
    pub next_offset: Option<i64>,
    pub total_count: i64,
    pub tasks: Vec<TaskWithAssignee>,
    /// The status filter this page was computed under (`"all"` when unfiltered).
    pub r#type: String,
}

/// One independently-paginated column of the kanban board.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardColumn {
    pub next_offset: Option<i64>,
    pub total_count: i64,
    pub tasks: Vec<TaskWithAssignee>,
}

/// Response for the grouped (board) listing: one page per status column.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardResponse {
    pub todo: BoardColumn,
    pub in_progress: BoardColumn,
    pub in_review: BoardColumn,
    pub done: BoardColumn,
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

/// POST /api/v1/projects/{project_id}/tasks
///
/// Create a task under a project. Side effects: labels are materialized
/// into the global catalog, and a `created` activity row is appended.
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(input): Json<CreateTask>,
) -> AppResult<(StatusCode, Json<Task>)> {
    validate_create(&input)?;

    ProjectRepo::find_by_id(&state.pool, project_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }))?;

    let task = TaskRepo::create(&state.pool, project_id, &input).await?;

    // Label catalog population is an explicit post-write step, not a
    // persistence-layer hook.
    sync_labels(&state, &task.labels).await;

    let entry = CreateActivity {
        task_id: task.id,
        action: "created".into(),
        key: None,
        previous_value: None,
        new_value: None,
        message: Some(format!("{} created the task", auth.name)),
        performed_by: Some(auth.name.clone()),
        user_id: Some(auth.user_id),
    };
    if let Err(e) = ActivityRepo::append(&state.pool, &entry).await {
        tracing::warn!(task_id = task.id, error = %e, "Failed to record task creation activity");
    }

    Ok((StatusCode::CREATED, Json(task)))
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

/// GET /api/v1/projects/{project_id}/tasks
///
/// List tasks in a project with filtering and pagination, assignees
/// resolved to `{id, name, email}`.
pub async fn list(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<TaskListResponse>> {
    ProjectRepo::find_by_id(&state.pool, project_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }))?;

    let (limit, offset) = params.clamped();
    let status_filter = params.status_filter(|s| TaskStatus::parse(s).map(TaskStatus::as_str))?;
    let list_params = TaskListParams {
        project_id,
        limit,
        offset,
        search: params.search(),
        status: status_filter.clone(),
        priority: params.priority_filter()?,
    };

    let (rows, total_count) = TaskRepo::list(&state.pool, &list_params).await?;
    if rows.is_empty() {
        return Err(AppError::NotFound("tasks not found".into()));
    }

    Ok(Json(TaskListResponse {
        next_offset: next_offset(offset, limit, total_count),
        total_count,
        tasks: rows.into_iter().map(Into::into).collect(),
        r#type: status_filter.unwrap_or_else(|| FILTER_ALL.to_string()),
    }))
}

/// GET /api/v1/projects/{project_id}/tasks/board
///
/// Kanban board: four concurrently-computed pages, one per status, each
/// with its own independent offset/limit/totalCount/nextOffset.
pub async fn board(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<BoardResponse>> {
    ProjectRepo::find_by_id(&state.pool, project_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }))?;

    let (limit, offset) = params.clamped();
    let search = params.search();
    let priority = params.priority_filter()?;

    let column_params = |status: TaskStatus| TaskListParams {
        project_id,
        limit,
        offset,
        search: search.clone(),
        status: Some(status.as_str().to_string()),
        priority: priority.clone(),
    };

    let todo_params = column_params(TaskStatus::Todo);
    let in_progress_params = column_params(TaskStatus::InProgress);
    let in_review_params = column_params(TaskStatus::InReview);
    let done_params = column_params(TaskStatus::Done);
    let (todo, in_progress, in_review, done) = tokio::try_join!(
        TaskRepo::list(&state.pool, &todo_params),
        TaskRepo::list(&state.pool, &in_progress_params),
        TaskRepo::list(&state.pool, &in_review_params),
        TaskRepo::list(&state.pool, &done_params),
    )?;

    let column = |(rows, total_count): (Vec<TaskListRow>, i64)| BoardColumn {
        next_offset: next_offset(offset, limit, total_count),
        total_count,
        tasks: rows.into_iter().map(Into::into).collect(),
    };

    Ok(Json(BoardResponse {
        todo: column(todo),
        in_progress: column(in_progress),
        in_review: column(in_review),
        done: column(done),
    }))
}

/// GET /api/v1/projects/tasks/{id}
pub async fn details(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<TaskWithAssignee>> {
    let row = TaskRepo::find_with_assignee(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Task",
            id,
        }))?;
    Ok(Json(row.into()))
}

// ---------------------------------------------------------------------------
// Update + audit
// ---------------------------------------------------------------------------

/// PUT /api/v1/projects/tasks/{id}
///
/// Partial task update. After the update commits, one activity row is
/// appended per changed field. An audit-write failure never rolls back the
/// update -- it is logged and the response still reports success.
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTask>,
) -> AppResult<Json<Task>> {
    validate_update(&input)?;

    // Pre-update snapshot for the audit diff.
    let before = TaskRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Task",
            id,
        }))?;

    let task = TaskRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Task",
            id,
        }))?;

    if let Some(ref labels) = input.labels {
        sync_labels(&state, labels).await;
    }

    // The update is already committed; audit failures must not undo it.
    match build_field_changes(&state, &before, &input).await {
        Ok(changes) if !changes.is_empty() => {
            let entries: Vec<CreateActivity> = changes
                .into_iter()
                .map(|change| CreateActivity {
                    task_id: id,
                    action: "updated".into(),
                    key: Some(change.key.to_string()),
                    previous_value: Some(change.previous_value),
                    new_value: Some(change.new_value),
                    message: Some(format!("{} updated the task", auth.name)),
                    performed_by: Some(auth.name.clone()),
                    user_id: Some(auth.user_id),
                })
                .collect();
            if let Err(e) = ActivityRepo::append_all(&state.pool, &entries).await {
                tracing::warn!(task_id = id, error = %e, "Failed to record task update activity");
            }
        }
        Ok(_) => {}
        Err(e) => {
            tracing::warn!(task_id = id, error = %e, "Failed to build task audit diff");
        }
    }

    Ok(Json(task))
}

/// Compute the display-form diff between the pre-update snapshot and the
/// update payload: one [`FieldChange`] per present-and-different field.
async fn build_field_changes(
    state: &AppState,
    before: &Task,
    input: &UpdateTask,
) -> Result<Vec<FieldChange>, AppError> {
    let mut changes = Vec::new();

    if let Some(ref title) = input.title {
        changes.extend(FieldChange::new(
            "title",
            display_value(Some(&before.title)),
            display_value(Some(title)),
        ));
    }
    if let Some(ref description) = input.description {
        changes.extend(FieldChange::new(
            "description",
            display_value(before.description.as_deref()),
            display_value(Some(description)),
        ));
    }
    if let Some(ref status) = input.status {
        changes.extend(FieldChange::new(
            "status",
            display_value(Some(&before.status)),
            display_value(Some(status)),
        ));
    }
    if let Some(ref priority) = input.priority {
        changes.extend(FieldChange::new(
            "priority",
            display_value(Some(&before.priority)),
            display_value(Some(priority)),
        ));
    }
    if let Some(start_date) = input.start_date {
        changes.extend(FieldChange::new(
            "startDate",
            display_value(before.start_date.map(|d| d.to_string()).as_deref()),
            start_date.to_string(),
        ));
    }
    if let Some(end_date) = input.end_date {
        changes.extend(FieldChange::new(
            "endDate",
            display_value(before.end_date.map(|d| d.to_string()).as_deref()),
            end_date.to_string(),
        ));
    }
    if let Some(assignee) = input.assignee {
        let previous = resolve_user_name(state, before.assignee).await?;
        let new = resolve_user_name(state, Some(assignee)).await?;
        changes.extend(FieldChange::new("assignee", previous, new));
    }
    if let Some(ref labels) = input.labels {
        changes.extend(FieldChange::new(
            "labels",
            display_labels(&before.labels),
            display_labels(labels),
        ));
    }

    Ok(changes)
}

/// Resolve an optional user id to a display name; absent or unknown users
/// display as `"N/A"`.
async fn resolve_user_name(state: &AppState, id: Option<DbId>) -> Result<String, AppError> {
    match id {
        Some(id) => Ok(UserRepo::find_by_id(&state.pool, id)
            .await?
            .map(|u| u.name)
            .unwrap_or_else(|| NA.to_string())),
        None => Ok(NA.to_string()),
    }
}

/// Materialize task label strings into the global catalog, ignoring
/// duplicates. Catalog failures are logged, never surfaced.
async fn sync_labels(state: &AppState, labels: &[String]) {
    if labels.is_empty() {
        return;
    }
    if let Err(e) = LabelRepo::upsert_many(&state.pool, labels).await {
        tracing::warn!(error = %e, "Failed to update label catalog");
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Request-shape validation for task creation.
fn validate_create(input: &CreateTask) -> Result<(), AppError> {
    let mut errors = Vec::new();
    if input.title.trim().len() < 3 || input.title.len() > 100 {
        errors.push("title must be 3-100 characters");
    }
    if TaskStatus::parse(&input.status).is_none() {
        errors.push("status must be one of: todo, in_progress, in_review, done");
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

/// Request-shape validation for task updates.
fn validate_update(input: &UpdateTask) -> Result<(), AppError> {
    let mut errors = Vec::new();
    if let Some(ref title) = input.title {
        if title.trim().len() < 3 || title.len() > 100 {
            errors.push("title must be 3-100 characters");
        }
    }
    if let Some(ref status) = input.status {
        if TaskStatus::parse(status).is_none() {
            errors.push("status must be one of: todo, in_progress, in_review, done");
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
