//! Project membership join entity.

use serde::Serialize;
use sqlx::FromRow;
use taskdeck_core::types::{DbId, Timestamp};

use crate::models::user::UserInfo;

/// A membership row from the `project_members` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMember {
    pub id: DbId,
    pub user_id: DbId,
    pub project_id: DbId,
    pub role: String,
    pub joined_at: Timestamp,
    pub created_at: Timestamp,
}

/// Flat row for the member list query (user joined in).
#[derive(Debug, Clone, FromRow)]
pub struct MemberListRow {
    pub id: DbId,
    pub role: String,
    pub joined_at: Timestamp,
    pub user_id: DbId,
    pub user_name: String,
    pub user_email: String,
}

/// A membership row with its user resolved to `{id, name, email}`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberWithUser {
    pub id: DbId,
    pub role: String,
    pub joined_at: Timestamp,
    pub user: UserInfo,
}

impl From<MemberListRow> for MemberWithUser {
    fn from(r: MemberListRow) -> Self {
        MemberWithUser {
            id: r.id,
            role: r.role,
            joined_at: r.joined_at,
            user: UserInfo {
                id: r.user_id,
                name: r.user_name,
                email: r.user_email,
            },
        }
    }
}

/// Filter parameters for the member list, scoped to one project.
#[derive(Debug, Clone)]
pub struct MemberListParams {
    pub project_id: DbId,
    pub limit: i64,
    pub offset: i64,
    /// Normalized search term matched against user name/email.
    pub search: Option<String>,
}
