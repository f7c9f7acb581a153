//! HTTP-level integration tests for member management: creation with
//! generated credentials, bulk add with duplicate skipping, listing,
//! password recovery, and bulk soft delete.

mod common;

use axum::http::StatusCode;
use common::{delete, expect_json, get, patch_json, post_json};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn add_member_generates_recoverable_credentials(pool: PgPool) {
    let (_admin, token) = common::seed_admin(&pool).await;
    let app = common::build_test_app(pool);

    let response = post_json(
        &app,
        "/api/v1/users/add-member",
        Some(&token),
        serde_json::json!({ "name": "Mina", "email": "mina@taskdeck.test", "role": "member" }),
    )
    .await;
    let user = expect_json(response, StatusCode::CREATED).await;
    assert_eq!(user["name"], "Mina");
    assert_eq!(user["role"], "member");
    assert_eq!(user["status"], "active");
    let id = user["id"].as_i64().unwrap();

    // The generated password can be decrypted back for admin recovery...
    let response = get(&app, &format!("/api/v1/users/show-password/{id}"), Some(&token)).await;
    let shown = expect_json(response, StatusCode::OK).await;
    let password = shown["decryptedPassword"].as_str().unwrap().to_string();
    assert!(!password.is_empty());

    // ...and it actually logs the member in.
    let response = post_json(
        &app,
        "/api/v1/auth/login",
        None,
        serde_json::json!({ "email": "mina@taskdeck.test", "password": password }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_email_is_409(pool: PgPool) {
    let (_admin, token) = common::seed_admin(&pool).await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "name": "Mina", "email": "mina@taskdeck.test" });
    let response = post_json(&app, "/api/v1/users/add-member", Some(&token), body.clone()).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = post_json(&app, "/api/v1/users/add-member", Some(&token), body).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn add_member_validates_email_shape(pool: PgPool) {
    let (_admin, token) = common::seed_admin(&pool).await;
    let app = common::build_test_app(pool);

    let response = post_json(
        &app,
        "/api/v1/users/add-member",
        Some(&token),
        serde_json::json!({ "name": "Bad", "email": "not-an-email" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn bulk_add_skips_existing_and_reports_inserted_subset(pool: PgPool) {
    let (_admin, token) = common::seed_admin(&pool).await;
    common::seed_member(&pool, "Existing", "existing@taskdeck.test").await;
    let app = common::build_test_app(pool);

    let response = post_json(
        &app,
        "/api/v1/users/add-member-bulk",
        Some(&token),
        serde_json::json!([
            { "name": "Existing", "email": "existing@taskdeck.test" },
            { "name": "Fresh One", "email": "fresh1@taskdeck.test" },
            { "name": "Fresh Two", "email": "fresh2@taskdeck.test" },
        ]),
    )
    .await;
    let json = expect_json(response, StatusCode::CREATED).await;
    assert_eq!(json["message"], "2 users added successfully");
    assert_eq!(json["result"].as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn member_list_filters_and_paginates(pool: PgPool) {
    let (_admin, token) = common::seed_admin(&pool).await;
    common::seed_member(&pool, "Active Ana", "ana@taskdeck.test").await;
    let (inactive, _) = common::seed_member(&pool, "Idle Ivan", "ivan@taskdeck.test").await;
    sqlx::query("UPDATE users SET status = 'inactive' WHERE id = $1")
        .bind(inactive.id)
        .execute(&pool)
        .await
        .unwrap();
    let app = common::build_test_app(pool);

    let response = get(
        &app,
        "/api/v1/users/members?role=member&status=active",
        Some(&token),
    )
    .await;
    let json = expect_json(response, StatusCode::OK).await;
    assert_eq!(json["totalCount"], 1);
    assert_eq!(json["users"][0]["name"], "Active Ana");

    let response = get(&app, "/api/v1/users/members?search=ivan", Some(&token)).await;
    let json = expect_json(response, StatusCode::OK).await;
    assert_eq!(json["totalCount"], 1);
    assert_eq!(json["users"][0]["name"], "Idle Ivan");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn remove_members_soft_deletes(pool: PgPool) {
    let (_admin, token) = common::seed_admin(&pool).await;
    let (a, _) = common::seed_member(&pool, "Gone One", "gone1@taskdeck.test").await;
    let (b, _) = common::seed_member(&pool, "Gone Two", "gone2@taskdeck.test").await;
    let app = common::build_test_app(pool.clone());

    let response = delete(
        &app,
        &format!("/api/v1/users/members?ids={},{}", a.id, b.id),
        Some(&token),
    )
    .await;
    let json = expect_json(response, StatusCode::OK).await;
    assert_eq!(json["message"], "success");

    // Soft-deleted: rows remain, flagged inactive with a deletion timestamp.
    let (deleted, inactive) = sqlx::query_as::<_, (i64, i64)>(
        "SELECT COUNT(*) FILTER (WHERE deleted_at IS NOT NULL), \
                COUNT(*) FILTER (WHERE status = 'inactive') \
         FROM users WHERE id = ANY($1)",
    )
    .bind(vec![a.id, b.id])
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(deleted, 2);
    assert_eq!(inactive, 2);

    // And they disappear from the member list.
    let response = get(&app, "/api/v1/users/members", Some(&token)).await;
    let json = expect_json(response, StatusCode::OK).await;
    let names: Vec<&str> = json["users"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["name"].as_str().unwrap())
        .collect();
    assert!(!names.contains(&"Gone One"));
    assert!(!names.contains(&"Gone Two"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn member_management_requires_admin(pool: PgPool) {
    let (_member, token) = common::seed_member(&pool, "Mina", "mina@taskdeck.test").await;
    let app = common::build_test_app(pool);

    let response = get(&app, "/api/v1/users/members", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = post_json(
        &app,
        "/api/v1/users/add-member",
        Some(&token),
        serde_json::json!({ "name": "Nope", "email": "nope@taskdeck.test" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn profile_update_changes_name_and_password(pool: PgPool) {
    let (_member, token) = common::seed_member(&pool, "Mina", "mina@taskdeck.test").await;
    let app = common::build_test_app(pool);

    let response = patch_json(
        &app,
        "/api/v1/users/profile",
        Some(&token),
        serde_json::json!({
            "name": "Mina Renamed",
            "password": "brand-new-password",
            "confirmPassword": "brand-new-password",
        }),
    )
    .await;
    let json = expect_json(response, StatusCode::OK).await;
    assert_eq!(json["name"], "Mina Renamed");

    // The new password works; the old one does not.
    let response = post_json(
        &app,
        "/api/v1/auth/login",
        None,
        serde_json::json!({ "email": "mina@taskdeck.test", "password": "brand-new-password" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = post_json(
        &app,
        "/api/v1/auth/login",
        None,
        serde_json::json!({ "email": "mina@taskdeck.test", "password": common::TEST_PASSWORD }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn mismatched_password_confirmation_is_400(pool: PgPool) {
    let (_member, token) = common::seed_member(&pool, "Mina", "mina@taskdeck.test").await;
    let app = common::build_test_app(pool);

    let response = patch_json(
        &app,
        "/api/v1/users/profile",
        Some(&token),
        serde_json::json!({ "password": "one-password", "confirmPassword": "other-password" }),
    )
    .await;
    let json = expect_json(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(json["message"], "Password and Confirm Password do not match");
}
