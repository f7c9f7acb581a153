//! Route definitions for the `/dashboard` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::dashboard;
use crate::state::AppState;

/// Routes mounted at `/dashboard`.
///
/// ```text
/// GET /overview           -> overview (admin)
/// GET /overview/project   -> project_overview (admin)
/// GET /overview/task      -> recent_tasks (admin)
/// GET /overview/member    -> recent_members (admin)
/// GET /overview/activity  -> recent_activity (admin)
/// GET /overview/chart     -> chart (any authenticated user, member-scoped)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/overview", get(dashboard::overview))
        .route("/overview/project", get(dashboard::project_overview))
        .route("/overview/task", get(dashboard::recent_tasks))
        .route("/overview/member", get(dashboard::recent_members))
        .route("/overview/activity", get(dashboard::recent_activity))
        .route("/overview/chart", get(dashboard::chart))
}
