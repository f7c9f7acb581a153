//! Route definitions, one module per resource, assembled under `/api/v1`.

pub mod auth;
pub mod dashboard;
pub mod health;
pub mod projects;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                          login (public)
/// /auth/refresh                        refresh (public)
/// /auth/logout                         logout (requires auth)
///
/// /projects                            list, create (create: admin only)
/// /projects/{id}                       get, update, delete (mutations: admin only)
/// /projects/members                    bulk add members
/// /projects/members/list               member list (?projectId&search)
/// /projects/{project_id}/tasks         list, create
/// /projects/{project_id}/tasks/board   grouped kanban listing
/// /projects/tasks/{id}                 task details, audited update
/// /projects/labels/list                label catalog
/// /projects/activity/{task_id}         task activity feed
/// /projects/comments/add               add comment
/// /projects/comments/{id}              list by task (GET), edit (PUT), delete
/// /projects/comments/reaction          reaction toggle
/// /projects/comments/reaction/{id}     reaction list
///
/// /users/profile                       get, patch own profile
/// /users/add-member                    create member (admin only)
/// /users/add-member-bulk               bulk create members (admin only)
/// /users/members                       list (GET), bulk soft delete (DELETE)
/// /users/members/{id}                  update member (admin only)
/// /users/show-password/{id}            decrypt stored password (admin only)
///
/// /dashboard/overview                  head-counts (admin only)
/// /dashboard/overview/project          top projects by progress (admin only)
/// /dashboard/overview/task             recent tasks (admin only)
/// /dashboard/overview/member           recent members (admin only)
/// /dashboard/overview/activity         recent activity (admin only)
/// /dashboard/overview/chart            chart rollup (member-scoped)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/projects", projects::router())
        .nest("/users", users::router())
        .nest("/dashboard", dashboard::router())
}
