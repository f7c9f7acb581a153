//! Route definitions for the `/projects` resource and its nested task,
//! member, label, activity, and comment surfaces.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{activity, comment, label, project, project_member, task};
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// Static segments (`tasks`, `members`, `labels`, `activity`, `comments`)
/// take priority over the `{id}` capture at the same position.
///
/// ```text
/// GET    /                             -> list
/// POST   /                             -> create (admin)
/// GET    /{id}                         -> get_by_id
/// PUT    /{id}                         -> update (admin)
/// DELETE /{id}                         -> delete (admin)
///
/// POST   /members                      -> add_members (bulk, partial-success)
/// GET    /members/list                 -> list_members
///
/// POST   /{project_id}/tasks           -> task create (+created activity)
/// GET    /{project_id}/tasks           -> task list
/// GET    /{project_id}/tasks/board     -> grouped kanban listing
/// GET    /tasks/{id}                   -> task details
/// PUT    /tasks/{id}                   -> audited task update
///
/// GET    /labels/list                  -> label catalog
/// GET    /activity/{task_id}           -> task activity feed
///
/// POST   /comments/add                 -> add comment
/// GET    /comments/{task_id}           -> comments of a task
/// PUT    /comments/{id}                -> edit comment
/// DELETE /comments/{id}                -> delete comment (cascades reactions)
/// POST   /comments/reaction            -> reaction toggle
/// GET    /comments/reaction/{id}       -> reaction list
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(project::list).post(project::create))
        .route("/members", post(project_member::add_members))
        .route("/members/list", get(project_member::list_members))
        .route("/labels/list", get(label::list))
        .route("/activity/{task_id}", get(activity::list_by_task))
        .route("/comments/add", post(comment::add))
        .route("/comments/reaction", post(comment::toggle_reaction))
        .route("/comments/reaction/{comment_id}", get(comment::list_reactions))
        .route(
            "/comments/{id}",
            get(comment::list_by_task)
                .put(comment::edit)
                .delete(comment::delete),
        )
        .route("/tasks/{id}", get(task::details).put(task::update))
        .route("/{project_id}/tasks", get(task::list).post(task::create))
        .route("/{project_id}/tasks/board", get(task::board))
        .route(
            "/{id}",
            get(project::get_by_id)
                .put(project::update)
                .delete(project::delete),
        )
}
