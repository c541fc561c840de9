//! Round trips against a live database
//!
//! Run with: DATABASE_URL=... cargo test -p tally-server -- --ignored

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use chrono::NaiveDate;
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use tally_server::db::{
    create_pool, schema, A2zChanges, A2zRepo, ConsultantLogEntry, ConsultantLogRepo,
    ContestLogRepo, CpRatingRepo, DbError, EngineerLogEntry, EngineerLogRepo, HabitEntryRepo,
    HabitRepo, NewContestLog, NewHabit, NewHabitEntry, NewTodo, ProjectRepo, RatingUpsert,
    TodoChanges, TodoRepo,
};
use tally_server::models::DateRange;
use tally_server::{build_router, AppState, SecretString, StorageClient};

async fn pool() -> PgPool {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = create_pool(&url).await.unwrap();
    schema::bootstrap(&pool).await.unwrap();
    pool
}

fn unique(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4())
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

async fn call(pool: &PgPool, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let storage = StorageClient::new("http://127.0.0.1:1", SecretString::new("k")).unwrap();
    let app = build_router(Arc::new(AppState {
        pool: pool.clone(),
        storage,
    }));

    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
#[ignore = "requires database"]
async fn created_todo_is_listed() {
    let pool = pool().await;
    let profile = unique("todo");

    let (status, body) = call(
        &pool,
        Method::POST,
        "/todos",
        Some(json!({"profile": profile, "content": "x"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["profile"], profile.as_str());
    assert_eq!(body["data"]["content"], "x");
    assert_eq!(body["data"]["completed"], false);
    let id = body["data"]["id"].as_str().unwrap().to_owned();

    let (status, body) = call(&pool, Method::GET, &format!("/todos?profile={profile}"), None).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec![id.as_str()]);
}

#[tokio::test]
#[ignore = "requires database"]
async fn update_changes_only_supplied_fields() {
    let pool = pool().await;
    let repo = TodoRepo::new(&pool);
    let todo = repo
        .create(NewTodo {
            profile: unique("update"),
            content: "write tests".into(),
            completed: false,
        })
        .await
        .unwrap();

    let updated = repo
        .update(
            todo.id,
            TodoChanges {
                completed: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert!(updated.completed);
    assert_eq!(updated.content, "write tests");
    assert_eq!(updated.created_at, todo.created_at);
}

#[tokio::test]
#[ignore = "requires database"]
async fn missing_id_is_not_found() {
    let pool = pool().await;
    let id = Uuid::new_v4();

    let err = TodoRepo::new(&pool).delete(id).await.unwrap_err();
    assert!(matches!(err, DbError::NotFound { resource: "todo", .. }));

    let (status, body) = call(
        &pool,
        Method::PUT,
        &format!("/todos/{id}"),
        Some(json!({"content": "y"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
}

#[tokio::test]
#[ignore = "requires database"]
async fn deleted_todo_leaves_list() {
    let pool = pool().await;
    let profile = unique("delete");
    let repo = TodoRepo::new(&pool);
    let todo = repo
        .create(NewTodo {
            profile: profile.clone(),
            content: "gone soon".into(),
            completed: false,
        })
        .await
        .unwrap();

    let deleted = repo.delete(todo.id).await.unwrap();
    assert_eq!(deleted.id, todo.id);
    assert!(repo.list(&profile).await.unwrap().is_empty());
}

#[tokio::test]
#[ignore = "requires database"]
async fn habit_delete_cascades_to_its_entries_only() {
    let pool = pool().await;
    let profile = unique("habits");
    let habits = HabitRepo::new(&pool);
    let entries = HabitEntryRepo::new(&pool);

    let doomed = habits
        .create(NewHabit {
            profile: profile.clone(),
            name: "Run".into(),
            sort_order: 0,
        })
        .await
        .unwrap();
    let kept = habits
        .create(NewHabit {
            profile: profile.clone(),
            name: "Read".into(),
            sort_order: 1,
        })
        .await
        .unwrap();

    for day in ["2024-04-01", "2024-04-02"] {
        entries
            .create(NewHabitEntry {
                habit_id: doomed.id,
                date: date(day),
                completed: true,
            })
            .await
            .unwrap();
    }
    entries
        .create(NewHabitEntry {
            habit_id: kept.id,
            date: date("2024-04-01"),
            completed: true,
        })
        .await
        .unwrap();

    let (deleted, removed) = habits.delete(doomed.id).await.unwrap();
    assert_eq!(deleted.id, doomed.id);
    assert_eq!(removed, 2);

    assert!(entries
        .list(Some(doomed.id), DateRange::all())
        .await
        .unwrap()
        .is_empty());
    assert_eq!(
        entries
            .list(Some(kept.id), DateRange::all())
            .await
            .unwrap()
            .len(),
        1
    );

    let remaining = habits.list(&profile).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, kept.id);
}

#[tokio::test]
#[ignore = "requires database"]
async fn rating_upsert_updates_in_place() {
    let pool = pool().await;
    let repo = CpRatingRepo::new(&pool);
    let platform = unique("judge");

    let first = repo
        .upsert(RatingUpsert {
            platform: platform.clone(),
            rating: 1500,
            max_rating: None,
            handle: Some("tally".into()),
        })
        .await
        .unwrap();
    let second = repo
        .upsert(RatingUpsert {
            platform: platform.clone(),
            rating: 1620,
            max_rating: Some(1620),
            handle: None,
        })
        .await
        .unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(second.rating, 1620);
    assert!(second.updated_at >= first.updated_at);

    let matching = repo
        .list()
        .await
        .unwrap()
        .into_iter()
        .filter(|r| r.platform == platform)
        .count();
    assert_eq!(matching, 1);

    repo.delete(&platform).await.unwrap();
    assert!(repo.get(&platform).await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires database"]
async fn unlogged_date_is_null() {
    let pool = pool().await;
    let repo = EngineerLogRepo::new(&pool);
    let day = date("1999-12-31");
    let _ = repo.delete(day).await;

    let (status, body) = call(&pool, Method::GET, "/daily-logs/engineer/1999-12-31", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true, "data": null, "error": null}));

    let saved = repo
        .save(EngineerLogEntry {
            date: day,
            dsa_solved: Some(4),
            cp_solved: None,
            dev_minutes: Some(90),
            notes: None,
        })
        .await
        .unwrap();
    assert_eq!(saved.cp_solved, 0);

    let resaved = repo
        .save(EngineerLogEntry {
            date: day,
            dsa_solved: None,
            cp_solved: Some(1),
            dev_minutes: None,
            notes: Some(Some("contest day".into())),
        })
        .await
        .unwrap();
    assert_eq!(resaved.id, saved.id);
    assert_eq!(resaved.dsa_solved, 4);
    assert_eq!(resaved.cp_solved, 1);
    assert_eq!(resaved.dev_minutes, 90);

    repo.delete(day).await.unwrap();
}

#[tokio::test]
#[ignore = "requires database"]
async fn null_clears_nullable_columns() {
    let pool = pool().await;
    let profile = unique("projects");

    let (status, body) = call(
        &pool,
        Method::POST,
        "/projects",
        Some(json!({
            "profile": profile,
            "project_name": "tally",
            "description": "progress tracker",
            "repo_url": "https://git.example.com/tally",
            "live_url": "https://tally.example.com"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let id = body["data"]["id"].as_str().unwrap().to_owned();

    let (status, body) = call(
        &pool,
        Method::PUT,
        &format!("/projects/{id}"),
        Some(json!({"repo_url": null})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["repo_url"], Value::Null);
    assert_eq!(body["data"]["description"], "progress tracker");
    assert_eq!(body["data"]["live_url"], "https://tally.example.com");

    let (status, body) = call(
        &pool,
        Method::PUT,
        &format!("/projects/{id}"),
        Some(json!({"description": null, "status": "done"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["description"], Value::Null);
    assert_eq!(body["data"]["status"], "done");
    assert_eq!(body["data"]["live_url"], "https://tally.example.com");

    ProjectRepo::new(&pool)
        .delete(Uuid::parse_str(&id).unwrap())
        .await
        .unwrap();
}

#[tokio::test]
#[ignore = "requires database"]
async fn null_notes_clear_daily_log_notes() {
    let pool = pool().await;
    let repo = EngineerLogRepo::new(&pool);
    let day = date("1999-12-29");
    let _ = repo.delete(day).await;

    repo.save(EngineerLogEntry {
        date: day,
        dsa_solved: Some(2),
        cp_solved: None,
        dev_minutes: None,
        notes: Some(Some("mock interview".into())),
    })
    .await
    .unwrap();

    let (status, body) = call(
        &pool,
        Method::POST,
        "/daily-logs/engineer",
        Some(json!({"date": "1999-12-29", "cp_solved": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["notes"], "mock interview");

    let (status, body) = call(
        &pool,
        Method::POST,
        "/daily-logs/engineer",
        Some(json!({"date": "1999-12-29", "notes": null})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["notes"], Value::Null);
    assert_eq!(body["data"]["dsa_solved"], 2);
    assert_eq!(body["data"]["cp_solved"], 1);

    repo.delete(day).await.unwrap();
}

#[tokio::test]
#[ignore = "requires database"]
async fn consultant_log_upsert_keeps_one_row_per_date() {
    let pool = pool().await;
    let repo = ConsultantLogRepo::new(&pool);
    let day = date("1999-12-30");
    let _ = repo.delete(day).await;

    let first = repo
        .save(ConsultantLogEntry {
            date: day,
            cases_solved: Some(3),
            guesstimates_solved: Some(2),
            reading_minutes: None,
            notes: None,
        })
        .await
        .unwrap();
    assert_eq!(first.reading_minutes, 0);

    let second = repo
        .save(ConsultantLogEntry {
            date: day,
            cases_solved: Some(5),
            guesstimates_solved: None,
            reading_minutes: Some(45),
            notes: None,
        })
        .await
        .unwrap();
    assert_eq!(second.id, first.id);
    assert_eq!(second.cases_solved, 5);
    assert_eq!(second.guesstimates_solved, 2);
    assert_eq!(second.reading_minutes, 45);
    assert_eq!(second.created_at, first.created_at);

    let same_day = repo
        .list(DateRange::new(Some(day), Some(day)).unwrap())
        .await
        .unwrap();
    assert_eq!(same_day.len(), 1);

    repo.delete(day).await.unwrap();
    assert!(repo.get(day).await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires database"]
async fn a2z_progress_is_a_single_row() {
    let pool = pool().await;
    let repo = A2zRepo::new(&pool);

    let full = repo
        .save(A2zChanges {
            easy_total: Some(130),
            easy_solved: Some(40),
            medium_total: Some(250),
            medium_solved: Some(60),
            hard_total: Some(75),
            hard_solved: Some(5),
        })
        .await
        .unwrap();
    assert_eq!(full.id, 1);

    let (status, body) = call(
        &pool,
        Method::PUT,
        "/a2z-progress",
        Some(json!({"medium_solved": 61})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["medium_solved"], 61);
    assert_eq!(body["data"]["easy_solved"], 40);
    assert_eq!(body["data"]["hard_total"], 75);

    let stored = repo.get().await.unwrap().unwrap();
    assert_eq!(stored.created_at, full.created_at);
    assert!(stored.updated_at >= full.updated_at);

    let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM a2z_progress")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(rows, 1);
}

#[tokio::test]
#[ignore = "requires database"]
async fn contest_logs_filter_by_platform_and_range() {
    let pool = pool().await;
    let repo = ContestLogRepo::new(&pool);
    let platform = unique("judge");
    let other = unique("other");

    let mut ids = Vec::new();
    for (name, day) in [
        ("round 1", "2024-01-10"),
        ("round 3", "2024-03-10"),
        ("round 2", "2024-02-10"),
    ] {
        let log = repo
            .create(NewContestLog {
                platform: platform.clone(),
                contest_name: name.into(),
                date: date(day),
                rank: None,
                rating_change: None,
                problems_solved: 2,
            })
            .await
            .unwrap();
        ids.push(log.id);
    }
    let stray = repo
        .create(NewContestLog {
            platform: other.clone(),
            contest_name: "elsewhere".into(),
            date: date("2024-02-15"),
            rank: Some(10),
            rating_change: Some(25),
            problems_solved: 4,
        })
        .await
        .unwrap();

    let ranged = repo
        .list(
            Some(platform.as_str()),
            DateRange::new(Some(date("2024-02-01")), Some(date("2024-03-31"))).unwrap(),
        )
        .await
        .unwrap();
    let names: Vec<&str> = ranged.iter().map(|l| l.contest_name.as_str()).collect();
    assert_eq!(names, vec!["round 3", "round 2"]);

    let (status, body) = call(
        &pool,
        Method::GET,
        &format!("/contest-logs?platform={platform}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let dates: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["date"].as_str().unwrap())
        .collect();
    assert_eq!(dates, vec!["2024-03-10", "2024-02-10", "2024-01-10"]);

    for id in ids {
        repo.delete(id).await.unwrap();
    }
    repo.delete(stray.id).await.unwrap();
}
