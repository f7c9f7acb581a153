//! Repository for the `users` table.
//!
//! Users are soft-deleted (`deleted_at` + status flip); every lookup that
//! feeds the application excludes deleted rows.

use sqlx::PgPool;
use taskdeck_core::types::DbId;

use crate::models::user::{CreateUser, UpdateUser, User, UserListParams, UserResponse};
use crate::repositories::filter::{bind_values, bind_values_scalar, BindValue, QueryFilter};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, email, role, status, password_hash, encrypted_password, \
                       avatar, phone_number, dob, gender, deleted_at, created_at, updated_at";

/// Safe column list for list responses (no password material).
const SAFE_COLUMNS: &str = "id, name, email, role, status, avatar, phone_number, dob, gender, \
                            created_at, updated_at";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users \
                 (name, email, role, password_hash, encrypted_password, avatar, \
                  phone_number, dob, gender)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.role)
            .bind(&input.password_hash)
            .bind(&input.encrypted_password)
            .bind(&input.avatar)
            .bind(&input.phone_number)
            .bind(input.dob)
            .bind(&input.gender)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID. Excludes soft-deleted rows.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by email, case-insensitively. Excludes soft-deleted rows.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM users WHERE lower(email) = lower($1) AND deleted_at IS NULL"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// List members with filtering and pagination.
    ///
    /// Returns safe rows (no password material) plus the total count of
    /// matching rows.
    pub async fn list(
        pool: &PgPool,
        params: &UserListParams,
    ) -> Result<(Vec<UserResponse>, i64), sqlx::Error> {
        let mut filter = QueryFilter::new();
        filter.raw("deleted_at IS NULL");
        if let Some(ref status) = params.status {
            filter.eq("status", BindValue::Text(status.clone()));
        }
        if let Some(ref role) = params.role {
            filter.eq("role", BindValue::Text(role.clone()));
        }
        if let Some(ref search) = params.search {
            filter.ilike_any(&["name", "email"], search);
        }

        let where_clause = filter.where_clause();
        let limit_idx = filter.next_bind_index();
        let offset_idx = limit_idx + 1;

        let query = format!(
            "SELECT {SAFE_COLUMNS} FROM users {where_clause} \
             ORDER BY created_at DESC \
             LIMIT ${limit_idx} OFFSET ${offset_idx}"
        );
        let rows = bind_values(sqlx::query_as::<_, UserResponse>(&query), filter.binds())
            .bind(params.limit)
            .bind(params.offset)
            .fetch_all(pool)
            .await?;

        let count_query = format!("SELECT COUNT(*)::BIGINT FROM users {where_clause}");
        let total = bind_values_scalar(sqlx::query_scalar::<_, i64>(&count_query), filter.binds())
            .fetch_one(pool)
            .await?;

        Ok((rows, total))
    }

    /// Update a user. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no live row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateUser,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                name = COALESCE($2, name),
                role = COALESCE($3, role),
                status = COALESCE($4, status),
                password_hash = COALESCE($5, password_hash),
                encrypted_password = COALESCE($6, encrypted_password),
                avatar = COALESCE($7, avatar),
                phone_number = COALESCE($8, phone_number),
                updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.role)
            .bind(&input.status)
            .bind(&input.password_hash)
            .bind(&input.encrypted_password)
            .bind(&input.avatar)
            .bind(&input.phone_number)
            .fetch_optional(pool)
            .await
    }

    /// Bulk soft delete: mark the given users deleted and inactive.
    ///
    /// Returns the number of rows affected. Already-deleted rows are left
    /// untouched.
    pub async fn bulk_soft_delete(pool: &PgPool, ids: &[DbId]) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE users SET deleted_at = NOW(), status = 'inactive', updated_at = NOW()
             WHERE id = ANY($1) AND deleted_at IS NULL",
        )
        .bind(ids)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
