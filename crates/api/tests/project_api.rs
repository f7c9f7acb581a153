//! HTTP-level integration tests for the project endpoints: creation with
//! the duplicate-name check, filtered/paginated listing, progress
//! aggregation, and member scoping.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_project, create_task, delete, expect_json, get, post_json, put_json};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_project_returns_201(pool: PgPool) {
    let (_admin, token) = common::seed_admin(&pool).await;
    let app = common::build_test_app(pool);

    let response = post_json(
        &app,
        "/api/v1/projects",
        Some(&token),
        serde_json::json!({
            "name": "alpha",
            "status": "active",
            "priority": "high",
            "description": "first project",
            "startDate": "2024-01-01",
        }),
    )
    .await;

    let json = expect_json(response, StatusCode::CREATED).await;
    assert_eq!(json["name"], "alpha");
    assert_eq!(json["status"], "active");
    assert_eq!(json["startDate"], "2024-01-01");
    assert!(json["id"].is_number());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_project_name_returns_409(pool: PgPool) {
    let (_admin, token) = common::seed_admin(&pool).await;
    let app = common::build_test_app(pool);

    create_project(&app, &token, "alpha").await;

    // Same name again, different casing: still a conflict.
    let response = post_json(
        &app,
        "/api/v1/projects",
        Some(&token),
        serde_json::json!({
            "name": "Alpha",
            "status": "active",
            "priority": "high",
            "description": "second project",
            "startDate": "2024-01-01",
        }),
    )
    .await;

    let json = expect_json(response, StatusCode::CONFLICT).await;
    assert_eq!(json["message"], "Project already exists");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_project_requires_admin(pool: PgPool) {
    let (_member, token) = common::seed_member(&pool, "Mina", "mina@taskdeck.test").await;
    let app = common::build_test_app(pool);

    let response = post_json(
        &app,
        "/api/v1/projects",
        Some(&token),
        serde_json::json!({
            "name": "forbidden",
            "status": "active",
            "priority": "high",
            "description": "members cannot create",
            "startDate": "2024-01-01",
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_project_validates_shape(pool: PgPool) {
    let (_admin, token) = common::seed_admin(&pool).await;
    let app = common::build_test_app(pool);

    let response = post_json(
        &app,
        "/api/v1/projects",
        Some(&token),
        serde_json::json!({
            "name": "ab",
            "status": "bogus",
            "priority": "high",
            "description": "x",
            "startDate": "2024-01-01",
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Listing + pagination
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_paginates_with_next_offset(pool: PgPool) {
    let (_admin, token) = common::seed_admin(&pool).await;
    let app = common::build_test_app(pool);

    for i in 0..5 {
        create_project(&app, &token, &format!("project-{i}")).await;
    }

    let response = get(&app, "/api/v1/projects?limit=2&offset=0", Some(&token)).await;
    let json = expect_json(response, StatusCode::OK).await;
    assert_eq!(json["totalCount"], 5);
    assert_eq!(json["nextOffset"], 2);
    assert_eq!(json["projects"].as_array().unwrap().len(), 2);

    // Last page: offset + limit >= totalCount, so nextOffset is null.
    let response = get(&app, "/api/v1/projects?limit=2&offset=4", Some(&token)).await;
    let json = expect_json(response, StatusCode::OK).await;
    assert_eq!(json["nextOffset"], serde_json::Value::Null);
    assert_eq!(json["projects"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn empty_slice_returns_404_even_with_matches(pool: PgPool) {
    let (_admin, token) = common::seed_admin(&pool).await;
    let app = common::build_test_app(pool);

    create_project(&app, &token, "only-one").await;

    // totalCount is 1, but the requested slice is past the end.
    let response = get(&app, "/api/v1/projects?limit=10&offset=10", Some(&token)).await;
    let json = expect_json(response, StatusCode::NOT_FOUND).await;
    assert_eq!(json["message"], "projects not found");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn search_is_case_insensitive_and_empty_means_omitted(pool: PgPool) {
    let (_admin, token) = common::seed_admin(&pool).await;
    let app = common::build_test_app(pool);

    create_project(&app, &token, "Website Redesign").await;
    create_project(&app, &token, "Mobile App").await;

    let response = get(&app, "/api/v1/projects?search=website", Some(&token)).await;
    let json = expect_json(response, StatusCode::OK).await;
    assert_eq!(json["totalCount"], 1);
    assert_eq!(json["projects"][0]["name"], "Website Redesign");

    // An empty search parameter behaves exactly like omitting it.
    let with_empty = get(&app, "/api/v1/projects?search=", Some(&token)).await;
    let with_empty = expect_json(with_empty, StatusCode::OK).await;
    let without = get(&app, "/api/v1/projects", Some(&token)).await;
    let without = expect_json(without, StatusCode::OK).await;
    assert_eq!(with_empty["totalCount"], without["totalCount"]);
    assert_eq!(
        with_empty["projects"].as_array().unwrap().len(),
        without["projects"].as_array().unwrap().len()
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn status_filter_all_is_a_sentinel(pool: PgPool) {
    let (_admin, token) = common::seed_admin(&pool).await;
    let app = common::build_test_app(pool);

    let first = create_project(&app, &token, "active-one").await;
    let response = put_json(
        &app,
        &format!("/api/v1/projects/{}", first["id"]),
        Some(&token),
        serde_json::json!({ "status": "completed" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    create_project(&app, &token, "active-two").await;

    let all = get(&app, "/api/v1/projects?status=all", Some(&token)).await;
    let all = expect_json(all, StatusCode::OK).await;
    assert_eq!(all["totalCount"], 2);

    let completed = get(&app, "/api/v1/projects?status=completed", Some(&token)).await;
    let completed = expect_json(completed, StatusCode::OK).await;
    assert_eq!(completed["totalCount"], 1);

    let bogus = get(&app, "/api/v1/projects?status=bogus", Some(&token)).await;
    assert_eq!(bogus.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn progress_tracks_completed_over_total(pool: PgPool) {
    let (_admin, token) = common::seed_admin(&pool).await;
    let app = common::build_test_app(pool);

    let project = create_project(&app, &token, "with-tasks").await;
    let project_id = project["id"].as_i64().unwrap();
    create_task(&app, &token, project_id, "task one", "done").await;
    create_task(&app, &token, project_id, "task two", "todo").await;
    create_task(&app, &token, project_id, "task three", "in_review").await;
    create_task(&app, &token, project_id, "task four", "done").await;

    // A second project with no tasks reports 0 progress.
    create_project(&app, &token, "empty").await;

    let response = get(&app, "/api/v1/projects", Some(&token)).await;
    let json = expect_json(response, StatusCode::OK).await;

    let projects = json["projects"].as_array().unwrap();
    let with_tasks = projects
        .iter()
        .find(|p| p["name"] == "with-tasks")
        .expect("project should be listed");
    assert_eq!(with_tasks["tasksCount"]["total"], 4);
    assert_eq!(with_tasks["tasksCount"]["completed"], 2);
    assert_eq!(with_tasks["progress"], 50.0);

    let empty = projects
        .iter()
        .find(|p| p["name"] == "empty")
        .expect("project should be listed");
    assert_eq!(empty["tasksCount"]["total"], 0);
    assert_eq!(empty["progress"], 0.0);
}

// ---------------------------------------------------------------------------
// Member scoping
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn members_only_see_their_projects(pool: PgPool) {
    let (_admin, admin_token) = common::seed_admin(&pool).await;
    let (member, member_token) = common::seed_member(&pool, "Mina", "mina@taskdeck.test").await;
    let app = common::build_test_app(pool);

    let mine = create_project(&app, &admin_token, "mine").await;
    create_project(&app, &admin_token, "not-mine").await;

    let response = post_json(
        &app,
        "/api/v1/projects/members",
        Some(&admin_token),
        serde_json::json!({
            "projectId": mine["id"],
            "members": [member.id],
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // Admin sees both projects.
    let response = get(&app, "/api/v1/projects", Some(&admin_token)).await;
    let json = expect_json(response, StatusCode::OK).await;
    assert_eq!(json["totalCount"], 2);

    // The member only sees the project they belong to.
    let response = get(&app, "/api/v1/projects", Some(&member_token)).await;
    let json = expect_json(response, StatusCode::OK).await;
    assert_eq!(json["totalCount"], 1);
    assert_eq!(json["projects"][0]["name"], "mine");
}

// ---------------------------------------------------------------------------
// Get / update / delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn get_update_delete_round_trip(pool: PgPool) {
    let (_admin, token) = common::seed_admin(&pool).await;
    let app = common::build_test_app(pool);

    let project = create_project(&app, &token, "lifecycle").await;
    let id = project["id"].as_i64().unwrap();

    let response = get(&app, &format!("/api/v1/projects/{id}"), Some(&token)).await;
    let json = expect_json(response, StatusCode::OK).await;
    assert_eq!(json["name"], "lifecycle");

    let response = put_json(
        &app,
        &format!("/api/v1/projects/{id}"),
        Some(&token),
        serde_json::json!({ "priority": "urgent" }),
    )
    .await;
    let json = expect_json(response, StatusCode::OK).await;
    assert_eq!(json["priority"], "urgent");
    assert_eq!(json["name"], "lifecycle");

    let response = delete(&app, &format!("/api/v1/projects/{id}"), Some(&token)).await;
    let json = expect_json(response, StatusCode::OK).await;
    assert_eq!(json["message"], "Project deleted successfully");

    let response = get(&app, &format!("/api/v1/projects/{id}"), Some(&token)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn requests_without_token_are_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(&app, "/api/v1/projects", None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
}
