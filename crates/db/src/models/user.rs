//! User entity model and DTOs.

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;
use taskdeck_core::types::{DbId, Timestamp};

/// Full user row from the `users` table.
///
/// Contains the password hash and the reversible encrypted copy -- NEVER
/// serialize this to API responses directly. Use [`UserResponse`] for
/// external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub role: String,
    pub status: String,
    pub password_hash: String,
    pub encrypted_password: Option<String>,
    pub avatar: Option<String>,
    pub phone_number: Option<String>,
    pub dob: Option<NaiveDate>,
    pub gender: Option<String>,
    pub deleted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe user representation for API responses (no password material).
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub role: String,
    pub status: String,
    pub avatar: Option<String>,
    pub phone_number: Option<String>,
    pub dob: Option<NaiveDate>,
    pub gender: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        UserResponse {
            id: u.id,
            name: u.name,
            email: u.email,
            role: u.role,
            status: u.status,
            avatar: u.avatar,
            phone_number: u.phone_number,
            dob: u.dob,
            gender: u.gender,
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}

/// Minimal user info joined into tasks, comments, and reactions.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserInfo {
    pub id: DbId,
    pub name: String,
    pub email: String,
}

/// DTO for inserting a new user. Password material is prepared by the
/// handler (hash + encrypted copy) before this reaches the repository.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub role: String,
    pub password_hash: String,
    pub encrypted_password: Option<String>,
    pub avatar: Option<String>,
    pub phone_number: Option<String>,
    pub dob: Option<NaiveDate>,
    pub gender: Option<String>,
}

/// DTO for updating an existing user. All fields are optional.
#[derive(Debug, Clone, Default)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub role: Option<String>,
    pub status: Option<String>,
    pub password_hash: Option<String>,
    pub encrypted_password: Option<String>,
    pub avatar: Option<String>,
    pub phone_number: Option<String>,
}

/// Filter parameters for the member list.
#[derive(Debug, Clone)]
pub struct UserListParams {
    pub limit: i64,
    pub offset: i64,
    /// Normalized search term (trimmed, never empty).
    pub search: Option<String>,
    /// Exact status, or `None` for the `"all"` sentinel.
    pub status: Option<String>,
    /// Exact role, or `None` for the `"all"` sentinel.
    pub role: Option<String>,
}
