//! Repository for the global `labels` catalog.
//!
//! The catalog is append-only: task handlers upsert label strings after
//! every task write, and duplicate names are silently ignored.

use sqlx::PgPool;

use crate::models::label::{Label, LabelListParams};
use crate::repositories::filter::{bind_values, bind_values_scalar, QueryFilter};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, created_at";

/// Provides catalog operations for labels.
pub struct LabelRepo;

impl LabelRepo {
    /// Materialize label strings into the catalog, ignoring duplicates.
    pub async fn upsert_many(pool: &PgPool, names: &[String]) -> Result<(), sqlx::Error> {
        if names.is_empty() {
            return Ok(());
        }
        sqlx::query(
            "INSERT INTO labels (name)
             SELECT DISTINCT unnest($1::TEXT[])
             ON CONFLICT ON CONSTRAINT uq_labels_name DO NOTHING",
        )
        .bind(names)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// List catalog labels with optional search and pagination.
    pub async fn list(
        pool: &PgPool,
        params: &LabelListParams,
    ) -> Result<(Vec<Label>, i64), sqlx::Error> {
        let mut filter = QueryFilter::new();
        if let Some(ref search) = params.search {
            filter.ilike_any(&["name"], search);
        }

        let where_clause = filter.where_clause();
        let limit_idx = filter.next_bind_index();
        let offset_idx = limit_idx + 1;

        let query = format!(
            "SELECT {COLUMNS} FROM labels {where_clause} \
             ORDER BY name ASC \
             LIMIT ${limit_idx} OFFSET ${offset_idx}"
        );
        let rows = bind_values(sqlx::query_as::<_, Label>(&query), filter.binds())
            .bind(params.limit)
            .bind(params.offset)
            .fetch_all(pool)
            .await?;

        let count_query = format!("SELECT COUNT(*)::BIGINT FROM labels {where_clause}");
        let total = bind_values_scalar(sqlx::query_scalar::<_, i64>(&count_query), filter.binds())
            .fetch_one(pool)
            .await?;

        Ok((rows, total))
    }
}
