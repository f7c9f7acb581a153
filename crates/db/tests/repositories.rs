//! Repository-level tests against a real database: uniqueness handling,
//! the append-only catalogs, and the list filters.

use sqlx::PgPool;
use taskdeck_db::models::label::LabelListParams;
use taskdeck_db::models::project::{CreateProject, ProjectListParams};
use taskdeck_db::models::task::CreateTask;
use taskdeck_db::models::user::CreateUser;
use taskdeck_db::repositories::{
    LabelRepo, ProjectMemberRepo, ProjectRepo, TaskRepo, UserRepo,
};

fn project_input(name: &str) -> CreateProject {
    CreateProject {
        name: name.to_string(),
        description: "repository test project".to_string(),
        status: "active".to_string(),
        priority: "high".to_string(),
        start_date: chrono::NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        end_date: None,
    }
}

fn user_input(name: &str, email: &str) -> CreateUser {
    CreateUser {
        name: name.to_string(),
        email: email.to_string(),
        role: "member".to_string(),
        password_hash: "not-a-real-hash".to_string(),
        encrypted_password: None,
        avatar: None,
        phone_number: None,
        dob: None,
        gender: None,
    }
}

fn task_input(title: &str, status: &str, labels: &[&str]) -> CreateTask {
    CreateTask {
        title: title.to_string(),
        description: None,
        status: status.to_string(),
        priority: "low".to_string(),
        start_date: None,
        end_date: None,
        assignee: None,
        labels: labels.iter().map(|l| l.to_string()).collect(),
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn label_catalog_tolerates_duplicates(pool: PgPool) {
    LabelRepo::upsert_many(&pool, &["bug".into(), "backend".into()])
        .await
        .unwrap();
    // Re-upserting known names plus a new one only adds the new one.
    LabelRepo::upsert_many(&pool, &["bug".into(), "ui".into(), "bug".into()])
        .await
        .unwrap();

    let params = LabelListParams {
        limit: 50,
        offset: 0,
        search: None,
    };
    let (labels, total) = LabelRepo::list(&pool, &params).await.unwrap();
    assert_eq!(total, 3);
    let names: Vec<&str> = labels.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, ["backend", "bug", "ui"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn bulk_add_members_skips_existing_rows(pool: PgPool) {
    let project = ProjectRepo::create(&pool, &project_input("memberships"))
        .await
        .unwrap();
    let a = UserRepo::create(&pool, &user_input("A", "a@test"))
        .await
        .unwrap();
    let b = UserRepo::create(&pool, &user_input("B", "b@test"))
        .await
        .unwrap();

    let first = ProjectMemberRepo::bulk_add(&pool, project.id, &[a.id], "developer")
        .await
        .unwrap();
    assert_eq!(first.len(), 1);

    // Adding both again only inserts the genuinely new membership.
    let second = ProjectMemberRepo::bulk_add(&pool, project.id, &[a.id, b.id], "developer")
        .await
        .unwrap();
    assert_eq!(second.len(), 1);
    assert_eq!(second[0].user_id, b.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_user_email_violates_unique_constraint(pool: PgPool) {
    UserRepo::create(&pool, &user_input("First", "same@test"))
        .await
        .unwrap();
    let err = UserRepo::create(&pool, &user_input("Second", "same@test"))
        .await
        .unwrap_err();

    match err {
        sqlx::Error::Database(db_err) => {
            assert_eq!(db_err.constraint(), Some("uq_users_email"));
        }
        other => panic!("expected a database error, got {other:?}"),
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn project_list_counts_tasks_and_scopes_to_members(pool: PgPool) {
    let visible = ProjectRepo::create(&pool, &project_input("visible"))
        .await
        .unwrap();
    let hidden = ProjectRepo::create(&pool, &project_input("hidden"))
        .await
        .unwrap();
    let user = UserRepo::create(&pool, &user_input("Scoped", "scoped@test"))
        .await
        .unwrap();
    ProjectMemberRepo::bulk_add(&pool, visible.id, &[user.id], "developer")
        .await
        .unwrap();

    TaskRepo::create(&pool, visible.id, &task_input("t1", "done", &[]))
        .await
        .unwrap();
    TaskRepo::create(&pool, visible.id, &task_input("t2", "todo", &[]))
        .await
        .unwrap();
    TaskRepo::create(&pool, hidden.id, &task_input("t3", "todo", &[]))
        .await
        .unwrap();

    let unscoped = ProjectListParams {
        limit: 10,
        offset: 0,
        search: None,
        status: None,
        priority: None,
        member_id: None,
    };
    let (projects, total) = ProjectRepo::list(&pool, &unscoped).await.unwrap();
    assert_eq!(total, 2);
    assert_eq!(projects.len(), 2);

    let scoped = ProjectListParams {
        member_id: Some(user.id),
        ..unscoped
    };
    let (projects, total) = ProjectRepo::list(&pool, &scoped).await.unwrap();
    assert_eq!(total, 1);
    assert_eq!(projects[0].project.name, "visible");
    assert_eq!(projects[0].tasks_count.total, 2);
    assert_eq!(projects[0].tasks_count.completed, 1);
    assert_eq!(projects[0].progress, 50.0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn soft_deleted_users_vanish_from_lookups(pool: PgPool) {
    let user = UserRepo::create(&pool, &user_input("Ghost", "ghost@test"))
        .await
        .unwrap();

    let removed = UserRepo::bulk_soft_delete(&pool, &[user.id]).await.unwrap();
    assert_eq!(removed, 1);

    assert!(UserRepo::find_by_id(&pool, user.id).await.unwrap().is_none());
    assert!(UserRepo::find_by_email(&pool, "ghost@test")
        .await
        .unwrap()
        .is_none());

    // A second soft delete is a no-op.
    let removed = UserRepo::bulk_soft_delete(&pool, &[user.id]).await.unwrap();
    assert_eq!(removed, 0);
}
