//! HTTP-level integration tests for tasks: creation side effects, the
//! audited update, assignee name resolution, the kanban board, and the
//! label catalog.

mod common;

use axum::http::StatusCode;
use common::{create_project, create_task, expect_json, get, post_json, put_json};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Create + created activity
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_task_logs_created_activity(pool: PgPool) {
    let (_admin, token) = common::seed_admin(&pool).await;
    let app = common::build_test_app(pool);

    let project = create_project(&app, &token, "tasks").await;
    let project_id = project["id"].as_i64().unwrap();
    let task = create_task(&app, &token, project_id, "first task", "todo").await;
    let task_id = task["id"].as_i64().unwrap();

    let response = get(
        &app,
        &format!("/api/v1/projects/activity/{task_id}"),
        Some(&token),
    )
    .await;
    let json = expect_json(response, StatusCode::OK).await;
    assert_eq!(json["totalCount"], 1);
    let entry = &json["results"][0];
    assert_eq!(entry["action"], "created");
    assert_eq!(entry["performedBy"], "Admin");
    assert_eq!(entry["message"], "Admin created the task");
    assert_eq!(entry["key"], serde_json::Value::Null);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_task_under_missing_project_is_404(pool: PgPool) {
    let (_admin, token) = common::seed_admin(&pool).await;
    let app = common::build_test_app(pool);

    let response = post_json(
        &app,
        "/api/v1/projects/999999/tasks",
        Some(&token),
        serde_json::json!({ "title": "orphan", "status": "todo", "priority": "low" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Update + audit diff
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn status_update_appends_exactly_one_activity_row(pool: PgPool) {
    let (_admin, token) = common::seed_admin(&pool).await;
    let app = common::build_test_app(pool);

    let project = create_project(&app, &token, "audit").await;
    let project_id = project["id"].as_i64().unwrap();
    let task = create_task(&app, &token, project_id, "audited task", "todo").await;
    let task_id = task["id"].as_i64().unwrap();

    let response = put_json(
        &app,
        &format!("/api/v1/projects/tasks/{task_id}"),
        Some(&token),
        serde_json::json!({ "status": "done" }),
    )
    .await;
    let json = expect_json(response, StatusCode::OK).await;
    assert_eq!(json["status"], "done");

    let response = get(
        &app,
        &format!("/api/v1/projects/activity/{task_id}"),
        Some(&token),
    )
    .await;
    let json = expect_json(response, StatusCode::OK).await;

    // One `created` row plus exactly one `updated` row for the status change.
    assert_eq!(json["totalCount"], 2);
    let updated: Vec<_> = json["results"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|a| a["action"] == "updated")
        .collect();
    assert_eq!(updated.len(), 1);
    assert_eq!(updated[0]["key"], "status");
    assert_eq!(updated[0]["previousValue"], "todo");
    assert_eq!(updated[0]["newValue"], "done");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn multi_field_update_audits_every_changed_field(pool: PgPool) {
    let (_admin, token) = common::seed_admin(&pool).await;
    let app = common::build_test_app(pool);

    let project = create_project(&app, &token, "multi").await;
    let project_id = project["id"].as_i64().unwrap();
    let task = create_task(&app, &token, project_id, "multi task", "todo").await;
    let task_id = task["id"].as_i64().unwrap();

    let response = put_json(
        &app,
        &format!("/api/v1/projects/tasks/{task_id}"),
        Some(&token),
        serde_json::json!({ "status": "in_review", "priority": "urgent" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(
        &app,
        &format!("/api/v1/projects/activity/{task_id}"),
        Some(&token),
    )
    .await;
    let json = expect_json(response, StatusCode::OK).await;

    let mut keys: Vec<String> = json["results"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|a| a["action"] == "updated")
        .map(|a| a["key"].as_str().unwrap().to_string())
        .collect();
    keys.sort();
    assert_eq!(keys, ["priority", "status"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn noop_update_appends_no_activity(pool: PgPool) {
    let (_admin, token) = common::seed_admin(&pool).await;
    let app = common::build_test_app(pool);

    let project = create_project(&app, &token, "noop").await;
    let project_id = project["id"].as_i64().unwrap();
    let task = create_task(&app, &token, project_id, "noop task", "todo").await;
    let task_id = task["id"].as_i64().unwrap();

    // Re-sending the current status is not a change.
    let response = put_json(
        &app,
        &format!("/api/v1/projects/tasks/{task_id}"),
        Some(&token),
        serde_json::json!({ "status": "todo" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(
        &app,
        &format!("/api/v1/projects/activity/{task_id}"),
        Some(&token),
    )
    .await;
    let json = expect_json(response, StatusCode::OK).await;
    assert_eq!(json["totalCount"], 1); // only the `created` row
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn assignee_change_resolves_names_with_na_fallback(pool: PgPool) {
    let (_admin, token) = common::seed_admin(&pool).await;
    let (member, _member_token) = common::seed_member(&pool, "Mina", "mina@taskdeck.test").await;
    let app = common::build_test_app(pool);

    let project = create_project(&app, &token, "assign").await;
    let project_id = project["id"].as_i64().unwrap();
    let task = create_task(&app, &token, project_id, "assign task", "todo").await;
    let task_id = task["id"].as_i64().unwrap();

    let response = put_json(
        &app,
        &format!("/api/v1/projects/tasks/{task_id}"),
        Some(&token),
        serde_json::json!({ "assignee": member.id }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(
        &app,
        &format!("/api/v1/projects/activity/{task_id}"),
        Some(&token),
    )
    .await;
    let json = expect_json(response, StatusCode::OK).await;

    let entry = json["results"]
        .as_array()
        .unwrap()
        .iter()
        .find(|a| a["key"] == "assignee")
        .expect("assignee change should be audited");
    // Display names, not raw ids; the absent previous assignee is "N/A".
    assert_eq!(entry["previousValue"], "N/A");
    assert_eq!(entry["newValue"], "Mina");
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn task_list_filters_and_paginates(pool: PgPool) {
    let (_admin, token) = common::seed_admin(&pool).await;
    let app = common::build_test_app(pool);

    let project = create_project(&app, &token, "listing").await;
    let project_id = project["id"].as_i64().unwrap();
    for i in 0..3 {
        create_task(&app, &token, project_id, &format!("todo-{i}"), "todo").await;
    }
    create_task(&app, &token, project_id, "finished", "done").await;

    let response = get(
        &app,
        &format!("/api/v1/projects/{project_id}/tasks?status=todo&limit=2"),
        Some(&token),
    )
    .await;
    let json = expect_json(response, StatusCode::OK).await;
    assert_eq!(json["totalCount"], 3);
    assert_eq!(json["nextOffset"], 2);
    assert_eq!(json["type"], "todo");
    assert_eq!(json["tasks"].as_array().unwrap().len(), 2);

    // Unfiltered listing reports the sentinel type.
    let response = get(
        &app,
        &format!("/api/v1/projects/{project_id}/tasks"),
        Some(&token),
    )
    .await;
    let json = expect_json(response, StatusCode::OK).await;
    assert_eq!(json["totalCount"], 4);
    assert_eq!(json["type"], "all");

    // An empty slice is a 404.
    let response = get(
        &app,
        &format!("/api/v1/projects/{project_id}/tasks?status=in_progress"),
        Some(&token),
    )
    .await;
    let json = expect_json(response, StatusCode::NOT_FOUND).await;
    assert_eq!(json["message"], "tasks not found");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn board_paginates_each_column_independently(pool: PgPool) {
    let (_admin, token) = common::seed_admin(&pool).await;
    let app = common::build_test_app(pool);

    let project = create_project(&app, &token, "board").await;
    let project_id = project["id"].as_i64().unwrap();
    for i in 0..3 {
        create_task(&app, &token, project_id, &format!("todo-{i}"), "todo").await;
    }
    create_task(&app, &token, project_id, "reviewing", "in_review").await;

    let response = get(
        &app,
        &format!("/api/v1/projects/{project_id}/tasks/board?limit=2"),
        Some(&token),
    )
    .await;
    let json = expect_json(response, StatusCode::OK).await;

    // Each column carries its own page and continuation.
    assert_eq!(json["todo"]["totalCount"], 3);
    assert_eq!(json["todo"]["nextOffset"], 2);
    assert_eq!(json["todo"]["tasks"].as_array().unwrap().len(), 2);

    assert_eq!(json["inReview"]["totalCount"], 1);
    assert_eq!(json["inReview"]["nextOffset"], serde_json::Value::Null);

    assert_eq!(json["inProgress"]["totalCount"], 0);
    assert_eq!(json["inProgress"]["tasks"].as_array().unwrap().len(), 0);
    assert_eq!(json["done"]["totalCount"], 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn task_details_resolves_assignee(pool: PgPool) {
    let (_admin, token) = common::seed_admin(&pool).await;
    let (member, _) = common::seed_member(&pool, "Mina", "mina@taskdeck.test").await;
    let app = common::build_test_app(pool);

    let project = create_project(&app, &token, "details").await;
    let project_id = project["id"].as_i64().unwrap();

    let response = post_json(
        &app,
        &format!("/api/v1/projects/{project_id}/tasks"),
        Some(&token),
        serde_json::json!({
            "title": "detailed task",
            "status": "todo",
            "priority": "high",
            "assignee": member.id,
            "labels": ["bug", "backend"],
        }),
    )
    .await;
    let task = expect_json(response, StatusCode::CREATED).await;
    let task_id = task["id"].as_i64().unwrap();

    let response = get(
        &app,
        &format!("/api/v1/projects/tasks/{task_id}"),
        Some(&token),
    )
    .await;
    let json = expect_json(response, StatusCode::OK).await;
    assert_eq!(json["assignee"]["name"], "Mina");
    assert_eq!(json["assignee"]["email"], "mina@taskdeck.test");
    assert_eq!(json["labels"], serde_json::json!(["bug", "backend"]));
}

// ---------------------------------------------------------------------------
// Label catalog
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn labels_materialize_into_global_catalog(pool: PgPool) {
    let (_admin, token) = common::seed_admin(&pool).await;
    let app = common::build_test_app(pool);

    let project = create_project(&app, &token, "labels").await;
    let project_id = project["id"].as_i64().unwrap();

    let response = post_json(
        &app,
        &format!("/api/v1/projects/{project_id}/tasks"),
        Some(&token),
        serde_json::json!({
            "title": "labelled",
            "status": "todo",
            "priority": "low",
            "labels": ["bug", "backend"],
        }),
    )
    .await;
    let task = expect_json(response, StatusCode::CREATED).await;
    let task_id = task["id"].as_i64().unwrap();

    // Re-sending a known label plus a new one only adds the new one.
    let response = put_json(
        &app,
        &format!("/api/v1/projects/tasks/{task_id}"),
        Some(&token),
        serde_json::json!({ "labels": ["bug", "backend", "urgent-fix"] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(&app, "/api/v1/projects/labels/list", Some(&token)).await;
    let json = expect_json(response, StatusCode::OK).await;
    assert_eq!(json["totalCount"], 3);
    let names: Vec<&str> = json["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["backend", "bug", "urgent-fix"]);
}
