//! Handlers for comments and the single-slot reaction toggle.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Serialize;
use taskdeck_core::error::CoreError;
use taskdeck_core::pagination::next_offset;
use taskdeck_core::types::DbId;
use taskdeck_db::models::comment::{AddComment, Comment, CommentListRow, CommentView, EditComment};
use taskdeck_db::models::comment_reaction::{ReactionAction, ReactionWithUser, ToggleReaction};
use taskdeck_db::models::user::UserInfo;
use taskdeck_db::repositories::{CommentReactionRepo, CommentRepo, TaskRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::PaginationParams;
use crate::state::AppState;

/// Reactions shown inline per comment; the rest are summarized by
/// `totalReactions`.
const INLINE_REACTION_LIMIT: usize = 10;

/// Response envelope for the comment list.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentListResponse {
    pub next_offset: Option<i64>,
    pub total_count: i64,
    pub results: Vec<CommentView>,
}

/// Response for the reaction toggle.
#[derive(Debug, Serialize)]
pub struct ReactionResponse {
    pub message: String,
    pub action: ReactionAction,
}

/// Response envelope for the per-comment reaction list.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactionListResponse {
    pub next_offset: Option<i64>,
    pub total_count: i64,
    pub results: Vec<ReactionWithUser>,
}

// ---------------------------------------------------------------------------
// Comments
// ---------------------------------------------------------------------------

/// POST /api/v1/projects/comments/add
///
/// Add a comment to a task; returns it joined with author display fields.
pub async fn add(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<AddComment>,
) -> AppResult<Json<CommentView>> {
    if input.comment.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "comment must not be empty".into(),
        )));
    }

    TaskRepo::find_by_id(&state.pool, input.task_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Task",
            id: input.task_id,
        }))?;

    let comment =
        CommentRepo::create(&state.pool, input.task_id, auth.user_id, &input.comment).await?;
    let row = CommentRepo::find_with_author(&state.pool, comment.id)
        .await?
        .ok_or_else(|| AppError::InternalError("Created comment vanished".into()))?;

    // A fresh comment has no reactions yet.
    Ok(Json(view_from_row(row, Vec::new())))
}

/// GET /api/v1/projects/comments/{task_id}
///
/// A task's comments, newest first, each enriched with its author, the
/// first 10 reactions (reactors resolved), and the full reaction count.
pub async fn list_by_task(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(task_id): Path<DbId>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<CommentListResponse>> {
    let (limit, offset) = params.clamped();

    let (rows, total_count) = CommentRepo::list_by_task(&state.pool, task_id, limit, offset).await?;
    if rows.is_empty() {
        return Err(AppError::NotFound("comments not found".into()));
    }

    // One query for the whole page's reactions, grouped per comment.
    let comment_ids: Vec<DbId> = rows.iter().map(|r| r.id).collect();
    let reactions = CommentReactionRepo::list_for_comments(&state.pool, &comment_ids).await?;
    let mut by_comment: HashMap<DbId, Vec<ReactionWithUser>> = HashMap::new();
    for reaction in reactions {
        by_comment.entry(reaction.comment_id).or_default().push(reaction);
    }

    let results = rows
        .into_iter()
        .map(|row| {
            let reactions = by_comment.remove(&row.id).unwrap_or_default();
            view_from_row(row, reactions)
        })
        .collect();

    Ok(Json(CommentListResponse {
        next_offset: next_offset(offset, limit, total_count),
        total_count,
        results,
    }))
}

/// PUT /api/v1/projects/comments/{id}
///
/// Replace a comment's text and mark it edited. No diff history is kept.
pub async fn edit(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<EditComment>,
) -> AppResult<Json<Comment>> {
    if input.comment.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "comment must not be empty".into(),
        )));
    }

    let comment = CommentRepo::update_body(&state.pool, id, &input.comment)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Comment",
            id,
        }))?;
    Ok(Json(comment))
}

/// DELETE /api/v1/projects/comments/{id}
///
/// Hard-deletes the comment; its reactions cascade-delete with it.
pub async fn delete(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<serde_json::Value>> {
    let deleted = CommentRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Comment",
            id,
        }));
    }
    Ok(Json(
        serde_json::json!({ "message": "Comment deleted successfully" }),
    ))
}

// ---------------------------------------------------------------------------
// Reactions
// ---------------------------------------------------------------------------

/// POST /api/v1/projects/comments/reaction
///
/// Single-slot reaction toggle:
/// - no existing row -> insert (`added`)
/// - same reaction   -> delete (`deleted`)
/// - different       -> update in place (`updated`)
pub async fn toggle_reaction(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<ToggleReaction>,
) -> AppResult<Json<ReactionResponse>> {
    if input.reaction.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "reaction must not be empty".into(),
        )));
    }

    CommentRepo::find_with_author(&state.pool, input.comment_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Comment",
            id: input.comment_id,
        }))?;

    let existing =
        CommentReactionRepo::find_by_comment_and_user(&state.pool, input.comment_id, auth.user_id)
            .await?;

    let action = match existing {
        None => {
            CommentReactionRepo::create(&state.pool, input.comment_id, auth.user_id, &input.reaction)
                .await?;
            ReactionAction::Added
        }
        Some(row) if row.reaction == input.reaction => {
            CommentReactionRepo::delete_by_comment_and_user(
                &state.pool,
                input.comment_id,
                auth.user_id,
            )
            .await?;
            ReactionAction::Deleted
        }
        Some(row) => {
            CommentReactionRepo::update_reaction(&state.pool, row.id, &input.reaction).await?;
            ReactionAction::Updated
        }
    };

    Ok(Json(ReactionResponse {
        message: "success".into(),
        action,
    }))
}

/// GET /api/v1/projects/comments/reaction/{comment_id}
///
/// A comment's reactions, reactors resolved, paginated.
pub async fn list_reactions(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(comment_id): Path<DbId>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<ReactionListResponse>> {
    let (limit, offset) = params.clamped();

    let (rows, total_count) =
        CommentReactionRepo::list_by_comment(&state.pool, comment_id, limit, offset).await?;
    if rows.is_empty() {
        return Err(AppError::NotFound("reactions not found".into()));
    }

    Ok(Json(ReactionListResponse {
        next_offset: next_offset(offset, limit, total_count),
        total_count,
        results: rows,
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Assemble a [`CommentView`] from a list row and its (full) reaction set,
/// truncating the inline list while keeping the real total.
fn view_from_row(row: CommentListRow, reactions: Vec<ReactionWithUser>) -> CommentView {
    let total_reactions = reactions.len() as i64;
    let truncated: Vec<ReactionWithUser> =
        reactions.into_iter().take(INLINE_REACTION_LIMIT).collect();
    CommentView {
        id: row.id,
        task_id: row.task_id,
        body: row.body,
        is_edited: row.is_edited,
        created_at: row.created_at,
        user: UserInfo {
            id: row.author_id,
            name: row.author_name,
            email: row.author_email,
        },
        reactions: truncated,
        total_reactions,
    }
}
