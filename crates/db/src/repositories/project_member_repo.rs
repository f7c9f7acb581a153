//! Repository for the `project_members` table.
//!
//! Membership rows are insert/delete only. Bulk adds tolerate duplicates:
//! rows violating the `(user_id, project_id)` uniqueness are silently
//! skipped and only the inserted subset is returned.

use sqlx::PgPool;
use taskdeck_core::types::DbId;

use crate::models::project_member::{MemberListParams, MemberListRow, ProjectMember};
use crate::repositories::filter::{bind_values, bind_values_scalar, BindValue, QueryFilter};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, project_id, role, joined_at, created_at";

/// Provides membership operations for projects.
pub struct ProjectMemberRepo;

impl ProjectMemberRepo {
    /// Bulk add users to a project with the given role.
    ///
    /// Uses `ON CONFLICT DO NOTHING` so existing memberships are skipped;
    /// the returned vector contains only the rows actually inserted.
    pub async fn bulk_add(
        pool: &PgPool,
        project_id: DbId,
        user_ids: &[DbId],
        role: &str,
    ) -> Result<Vec<ProjectMember>, sqlx::Error> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!(
            "INSERT INTO project_members (user_id, project_id, role)
             SELECT unnest($1::BIGINT[]), $2, $3
             ON CONFLICT ON CONSTRAINT uq_project_members_user_project DO NOTHING
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectMember>(&query)
            .bind(user_ids)
            .bind(project_id)
            .bind(role)
            .fetch_all(pool)
            .await
    }

    /// List members of a project with their user info, paginated.
    ///
    /// The search term matches the joined user's name or email.
    pub async fn list(
        pool: &PgPool,
        params: &MemberListParams,
    ) -> Result<(Vec<MemberListRow>, i64), sqlx::Error> {
        let mut filter = QueryFilter::new();
        filter.eq("m.project_id", BindValue::BigInt(params.project_id));
        filter.raw("u.deleted_at IS NULL");
        if let Some(ref search) = params.search {
            filter.ilike_any(&["u.name", "u.email"], search);
        }

        let where_clause = filter.where_clause();
        let limit_idx = filter.next_bind_index();
        let offset_idx = limit_idx + 1;

        let query = format!(
            "SELECT m.id, m.role, m.joined_at, \
                    u.id AS user_id, u.name AS user_name, u.email AS user_email \
             FROM project_members m \
             JOIN users u ON u.id = m.user_id \
             {where_clause} \
             ORDER BY m.joined_at DESC \
             LIMIT ${limit_idx} OFFSET ${offset_idx}"
        );
        let rows = bind_values(sqlx::query_as::<_, MemberListRow>(&query), filter.binds())
            .bind(params.limit)
            .bind(params.offset)
            .fetch_all(pool)
            .await?;

        let count_query = format!(
            "SELECT COUNT(*)::BIGINT FROM project_members m \
             JOIN users u ON u.id = m.user_id \
             {where_clause}"
        );
        let total = bind_values_scalar(sqlx::query_scalar::<_, i64>(&count_query), filter.binds())
            .fetch_one(pool)
            .await?;

        Ok((rows, total))
    }

    /// Remove a membership row. Returns `true` if a row was removed.
    pub async fn remove(pool: &PgPool, project_id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM project_members WHERE project_id = $1 AND user_id = $2")
                .bind(project_id)
                .bind(user_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
