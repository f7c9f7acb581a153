//! Activity audit trail entity and DTOs.
//!
//! Activity rows are append-only (no `updated_at`): one `created` row per
//! task creation, and one `updated` row per changed field on task update.

use serde::Serialize;
use sqlx::FromRow;
use taskdeck_core::types::{DbId, Timestamp};

/// A single activity row. Immutable once created.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: DbId,
    pub task_id: DbId,
    pub action: String,
    pub key: Option<String>,
    pub previous_value: Option<String>,
    pub new_value: Option<String>,
    pub message: Option<String>,
    pub performed_by: Option<String>,
    pub user_id: Option<DbId>,
    pub created_at: Timestamp,
}

/// DTO for appending a new activity row.
#[derive(Debug, Clone)]
pub struct CreateActivity {
    pub task_id: DbId,
    pub action: String,
    pub key: Option<String>,
    pub previous_value: Option<String>,
    pub new_value: Option<String>,
    pub message: Option<String>,
    pub performed_by: Option<String>,
    pub user_id: Option<DbId>,
}
