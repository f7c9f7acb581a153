//! Global label catalog entity.

use serde::Serialize;
use sqlx::FromRow;
use taskdeck_core::types::{DbId, Timestamp};

/// A label row from the `labels` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Label {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
}

/// Filter parameters for the label list.
#[derive(Debug, Clone)]
pub struct LabelListParams {
    pub limit: i64,
    pub offset: i64,
    /// Normalized search term (trimmed, never empty).
    pub search: Option<String>,
}
