//! Route definitions for the `/users` resource.

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::user;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET    /profile             -> get_profile
/// PATCH  /profile             -> update_profile
/// POST   /add-member          -> add_member (admin)
/// POST   /add-member-bulk     -> add_members_bulk (admin)
/// GET    /members             -> list_members (admin)
/// DELETE /members             -> remove_members (admin, ?ids=1,2)
/// PATCH  /members/{id}        -> update_member (admin)
/// GET    /show-password/{id}  -> show_password (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/profile",
            get(user::get_profile).patch(user::update_profile),
        )
        .route("/add-member", post(user::add_member))
        .route("/add-member-bulk", post(user::add_members_bulk))
        .route(
            "/members",
            get(user::list_members).delete(user::remove_members),
        )
        .route("/members/{id}", patch(user::update_member))
        .route("/show-password/{id}", get(user::show_password))
}
