//! Handlers for user profiles and admin member management.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use taskdeck_core::error::CoreError;
use taskdeck_core::pagination::{clamp_limit, clamp_offset, next_offset, normalize_search};
use taskdeck_core::password::{generate_password, GENERATED_PASSWORD_LEN};
use taskdeck_core::roles::{ROLE_ADMIN, ROLE_MEMBER};
use taskdeck_core::status::UserStatus;
use taskdeck_core::types::DbId;
use taskdeck_core::{crypto, status};
use taskdeck_db::models::user::{CreateUser, UpdateUser, UserListParams, UserResponse};
use taskdeck_db::repositories::UserRepo;
use validator::Validate;

use crate::auth::password::{hash_password, validate_password_strength};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// Minimum password length for self-chosen passwords.
const MIN_PASSWORD_LENGTH: usize = 8;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /users/add-member`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddMemberRequest {
    #[validate(length(min = 3, max = 50))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    /// Defaults to `member`.
    pub role: Option<String>,
    pub avatar: Option<String>,
    pub phone_number: Option<String>,
    pub dob: Option<chrono::NaiveDate>,
    pub gender: Option<String>,
}

/// Response for bulk member creation: only the inserted subset is reported.
#[derive(Debug, Serialize)]
pub struct BulkAddResponse {
    pub message: String,
    pub result: Vec<UserResponse>,
}

/// Query parameters for `GET /users/members` and `DELETE /users/members`.
#[derive(Debug, Deserialize)]
pub struct MemberQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub search: Option<String>,
    pub status: Option<String>,
    pub role: Option<String>,
    /// Comma-separated id list for the bulk delete.
    pub ids: Option<String>,
}

/// Response envelope for the member list.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberListResponse {
    pub next_offset: Option<i64>,
    pub total_count: i64,
    pub users: Vec<UserResponse>,
}

/// Request body for `PATCH /users/members/{id}`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateMemberRequest {
    #[validate(length(min = 3, max = 50))]
    pub name: Option<String>,
    pub role: Option<String>,
    pub status: Option<String>,
}

/// Request body for `PATCH /users/profile`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[validate(length(min = 3, max = 50))]
    pub name: Option<String>,
    pub password: Option<String>,
    pub confirm_password: Option<String>,
}

/// Response for `GET /users/show-password/{id}`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowPasswordResponse {
    pub decrypted_password: String,
}

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

/// GET /api/v1/users/profile
pub async fn get_profile(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<UserResponse>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;
    Ok(Json(user.into()))
}

/// PATCH /api/v1/users/profile
///
/// Update own name and/or password. A password change re-hashes and
/// re-encrypts the recoverable copy.
pub async fn update_profile(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<UpdateProfileRequest>,
) -> AppResult<Json<UserResponse>> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;

    let mut update = UpdateUser {
        name: input.name.clone(),
        ..Default::default()
    };

    if let Some(ref password) = input.password {
        if input.confirm_password.as_deref() != Some(password.as_str()) {
            return Err(AppError::Core(CoreError::Validation(
                "Password and Confirm Password do not match".into(),
            )));
        }
        validate_password_strength(password, MIN_PASSWORD_LENGTH)
            .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

        update.password_hash = Some(
            hash_password(password)
                .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?,
        );
        update.encrypted_password = Some(crypto::encrypt_password(
            &state.config.password_encryption_key,
            password,
        )?);
    }

    let user = UserRepo::update(&state.pool, auth.user_id, &update)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;
    Ok(Json(user.into()))
}

// ---------------------------------------------------------------------------
// Admin member management
// ---------------------------------------------------------------------------

/// POST /api/v1/users/add-member
///
/// Create a member with a generated password, stored as an Argon2id hash
/// plus a reversible encrypted copy for admin-assisted recovery.
pub async fn add_member(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<AddMemberRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;
    let role = validate_role(input.role.as_deref())?;

    if UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "email already exist".into(),
        )));
    }

    let user = insert_member(&state, &input, role).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// POST /api/v1/users/add-member-bulk
///
/// Bulk member creation. Rows whose email already exists are skipped; only
/// the inserted subset is reported (partial-success envelope).
pub async fn add_members_bulk(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<Vec<AddMemberRequest>>,
) -> AppResult<(StatusCode, Json<BulkAddResponse>)> {
    if input.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Invalid or empty user data".into(),
        )));
    }

    let mut inserted = Vec::new();
    for member in &input {
        if member.validate().is_err() {
            tracing::warn!(email = %member.email, "Skipping invalid bulk member row");
            continue;
        }
        let Ok(role) = validate_role(member.role.as_deref()) else {
            tracing::warn!(email = %member.email, "Skipping bulk member row with bad role");
            continue;
        };
        if UserRepo::find_by_email(&state.pool, &member.email)
            .await?
            .is_some()
        {
            tracing::info!(email = %member.email, "Skipping existing member in bulk add");
            continue;
        }
        inserted.push(insert_member(&state, member, role).await?);
    }

    if inserted.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "No new users to add".into(),
        )));
    }

    let response = BulkAddResponse {
        message: format!("{} users added successfully", inserted.len()),
        result: inserted,
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /api/v1/users/members
///
/// Paginated member list with `search`/`status`/`role` filters; the `"all"`
/// sentinel skips a filter.
pub async fn list_members(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<MemberQuery>,
) -> AppResult<Json<MemberListResponse>> {
    let limit = clamp_limit(params.limit);
    let offset = clamp_offset(params.offset);

    let status = match params.status.as_deref() {
        None => None,
        Some(v) => status::parse_filter(v, |s| UserStatus::parse(s).map(UserStatus::as_str))
            .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?
            .map(str::to_string),
    };
    let role = match params.role.as_deref() {
        None | Some(status::FILTER_ALL) => None,
        Some(r) if r == ROLE_ADMIN || r == ROLE_MEMBER => Some(r.to_string()),
        Some(r) => {
            return Err(AppError::Core(CoreError::Validation(format!(
                "invalid filter value: {r}"
            ))))
        }
    };

    let list_params = UserListParams {
        limit,
        offset,
        search: normalize_search(params.search.as_deref()),
        status,
        role,
    };

    let (users, total_count) = UserRepo::list(&state.pool, &list_params).await?;
    if users.is_empty() {
        return Err(AppError::NotFound("members not found".into()));
    }

    Ok(Json(MemberListResponse {
        next_offset: next_offset(offset, limit, total_count),
        total_count,
        users,
    }))
}

/// DELETE /api/v1/users/members?ids=1,2,3
///
/// Bulk soft delete: marks the users deleted and inactive.
pub async fn remove_members(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<MemberQuery>,
) -> AppResult<Json<serde_json::Value>> {
    let ids = parse_id_list(params.ids.as_deref())?;
    let removed = UserRepo::bulk_soft_delete(&state.pool, &ids).await?;
    tracing::info!(requested = ids.len(), removed, "Members soft-deleted");
    Ok(Json(serde_json::json!({ "message": "success" })))
}

/// PATCH /api/v1/users/members/{id}
pub async fn update_member(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateMemberRequest>,
) -> AppResult<Json<UserResponse>> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;
    if let Some(ref role) = input.role {
        if role != ROLE_ADMIN && role != ROLE_MEMBER {
            return Err(AppError::Core(CoreError::Validation(
                "role must be admin or member".into(),
            )));
        }
    }
    if let Some(ref status) = input.status {
        if UserStatus::parse(status).is_none() {
            return Err(AppError::Core(CoreError::Validation(
                "status must be active or inactive".into(),
            )));
        }
    }

    let update = UpdateUser {
        name: input.name,
        role: input.role,
        status: input.status,
        ..Default::default()
    };
    let user = UserRepo::update(&state.pool, id, &update)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    Ok(Json(user.into()))
}

/// GET /api/v1/users/show-password/{id}
///
/// Decrypt a member's stored password copy for admin-assisted recovery.
pub async fn show_password(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ShowPasswordResponse>> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    let encrypted = user.encrypted_password.ok_or_else(|| {
        AppError::NotFound("No recoverable password stored for this user".into())
    })?;
    let decrypted =
        crypto::decrypt_password(&state.config.password_encryption_key, &encrypted)?;

    Ok(Json(ShowPasswordResponse {
        decrypted_password: decrypted,
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Generate credentials and insert one member row.
async fn insert_member(
    state: &AppState,
    input: &AddMemberRequest,
    role: &str,
) -> Result<UserResponse, AppError> {
    let password = generate_password(GENERATED_PASSWORD_LEN);
    let password_hash = hash_password(&password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    let encrypted_password =
        crypto::encrypt_password(&state.config.password_encryption_key, &password)?;

    let create = CreateUser {
        name: input.name.clone(),
        email: input.email.clone(),
        role: role.to_string(),
        password_hash,
        encrypted_password: Some(encrypted_password),
        avatar: input.avatar.clone(),
        phone_number: input.phone_number.clone(),
        dob: input.dob,
        gender: input.gender.clone(),
    };

    let user = UserRepo::create(&state.pool, &create).await?;
    Ok(user.into())
}

/// Validate an optional role value, defaulting to `member`.
fn validate_role(role: Option<&str>) -> Result<&'static str, AppError> {
    match role {
        None => Ok(ROLE_MEMBER),
        Some(r) if r == ROLE_MEMBER => Ok(ROLE_MEMBER),
        Some(r) if r == ROLE_ADMIN => Ok(ROLE_ADMIN),
        Some(_) => Err(AppError::Core(CoreError::Validation(
            "role must be admin or member".into(),
        ))),
    }
}

/// Parse a comma-separated id list (`?ids=1,2,3`).
fn parse_id_list(ids: Option<&str>) -> Result<Vec<DbId>, AppError> {
    let raw = ids.ok_or_else(|| {
        AppError::Core(CoreError::Validation("ids query parameter is required".into()))
    })?;
    let parsed: Result<Vec<DbId>, _> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::parse::<DbId>)
        .collect();
    let parsed =
        parsed.map_err(|_| AppError::Core(CoreError::Validation("ids must be numeric".into())))?;
    if parsed.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "ids must not be empty".into(),
        )));
    }
    Ok(parsed)
}
