//! Handler tests for the Todos domain
//!
//! These drive the todos router end to end against the in-memory store:
//! - Request deserialization and trimming
//! - Response envelopes and status codes
//! - Validation and not-found errors

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_todos::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt; // For oneshot()

fn app(repo: InMemoryTodoRepository) -> Router {
    handlers::router(TodoService::new(repo))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&json).unwrap())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn create(app: &Router, body: Value) -> Value {
    let (status, json) = send(app, "POST", "/", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {json}");
    json["data"].clone()
}

#[tokio::test]
async fn test_create_returns_201_with_defaults() {
    let app = app(InMemoryTodoRepository::new());

    let (status, json) = send(&app, "POST", "/", Some(json!({"title": "  Buy milk  "}))).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "Todo created");
    assert_eq!(json["data"]["title"], "Buy milk");
    assert_eq!(json["data"]["priority"], "medium");
    assert_eq!(json["data"]["category"], "general");
    assert_eq!(json["data"]["completed"], false);
    assert_eq!(json["data"]["isOverdue"], false);
    assert!(json["data"]["_id"].is_string());
}

#[tokio::test]
async fn test_create_rejects_long_title_naming_field() {
    let app = app(InMemoryTodoRepository::new());

    let (status, json) = send(&app, "POST", "/", Some(json!({"title": "x".repeat(201)}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Validation failed");
    assert_eq!(json["errors"][0]["field"], "title");
}

#[tokio::test]
async fn test_create_reports_every_violation() {
    let app = app(InMemoryTodoRepository::new());

    let (status, json) = send(
        &app,
        "POST",
        "/",
        Some(json!({"title": "", "priority": "urgent", "dueDate": "soon"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let fields: Vec<&str> = json["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["dueDate", "priority", "title"]);

    let (_, list) = send(&app, "GET", "/", None).await;
    assert_eq!(list["pagination"]["total"], 0);
}

#[tokio::test]
async fn test_wrong_json_types_are_listed_with_other_violations() {
    let app = app(InMemoryTodoRepository::new());
    let todo = create(&app, json!({"title": "typed"})).await;
    let id = todo["_id"].as_str().unwrap();

    let (status, json) = send(
        &app,
        "PUT",
        &format!("/{id}"),
        Some(json!({"title": 5, "completed": "yes", "priority": "urgent"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "VALIDATION_ERROR");
    assert_eq!(
        json["errors"],
        json!([
            {"field": "completed", "message": "completed must be true or false"},
            {"field": "priority", "message": "Priority must be low, medium, or high"},
            {"field": "title", "message": "Title must be a string"}
        ])
    );

    let (_, json) = send(&app, "GET", &format!("/{id}"), None).await;
    assert_eq!(json["data"]["title"], "typed");
}

#[tokio::test]
async fn test_create_accepts_exact_length_limits() {
    let app = app(InMemoryTodoRepository::new());

    let todo = create(
        &app,
        json!({
            "title": "t".repeat(200),
            "description": "d".repeat(1000),
            "category": "c".repeat(50)
        }),
    )
    .await;

    assert_eq!(todo["title"].as_str().unwrap().len(), 200);
    assert_eq!(todo["description"].as_str().unwrap().len(), 1000);
    assert_eq!(todo["category"].as_str().unwrap().len(), 50);
}

#[tokio::test]
async fn test_malformed_json_renders_envelope() {
    let app = app(InMemoryTodoRepository::new());

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/")
                .header("content-type", "application/json")
                .body(Body::from("{\"title\": "))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["success"], false);
}

#[tokio::test]
async fn test_list_paginates_with_has_more() {
    let app = app(InMemoryTodoRepository::new());
    for title in ["one", "two", "three"] {
        create(&app, json!({"title": title})).await;
    }

    let (status, json) = send(&app, "GET", "/?limit=1&skip=0", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"][0]["title"], "three");
    assert_eq!(
        json["pagination"],
        json!({"total": 3, "limit": 1, "skip": 0, "hasMore": true})
    );

    let (_, last) = send(&app, "GET", "/?limit=1&skip=2", None).await;
    assert_eq!(last["pagination"]["hasMore"], false);
}

#[tokio::test]
async fn test_list_filters_and_sorts() {
    let app = app(InMemoryTodoRepository::new());
    create(&app, json!({"title": "b", "priority": "high", "category": "Work"})).await;
    create(&app, json!({"title": "a", "priority": "high", "category": "homework"})).await;
    create(&app, json!({"title": "c", "priority": "low", "category": "work"})).await;

    let (status, json) = send(
        &app,
        "GET",
        "/?priority=high&category=WORK&sortBy=title&sortOrder=asc",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let titles: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["a", "b"]);
    assert_eq!(json["pagination"]["total"], 2);
}

#[tokio::test]
async fn test_list_rejects_bad_query() {
    let app = app(InMemoryTodoRepository::new());

    let (status, json) = send(&app, "GET", "/?limit=0&sortBy=secret", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["errors"][0]["field"], "limit");
    assert_eq!(json["errors"][1]["field"], "sortBy");
}

#[tokio::test]
async fn test_list_rejects_skip_beyond_signed_range() {
    let app = app(InMemoryTodoRepository::new());

    let (status, json) = send(&app, "GET", "/?skip=9223372036854775808", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["errors"][0]["field"], "skip");

    let (status, json) = send(&app, "GET", "/?skip=9223372036854775807", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"], json!([]));
    assert_eq!(json["pagination"]["hasMore"], false);
}

#[tokio::test]
async fn test_get_update_toggle_delete_flow() {
    let app = app(InMemoryTodoRepository::new());
    let todo = create(
        &app,
        json!({"title": "Write report", "description": "Q3", "priority": "high"}),
    )
    .await;
    let id = todo["_id"].as_str().unwrap().to_string();

    let (status, json) = send(&app, "GET", &format!("/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["title"], "Write report");

    let (status, json) = send(
        &app,
        "PUT",
        &format!("/{id}"),
        Some(json!({"title": "Write final report", "completed": true})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Todo updated");
    assert_eq!(json["data"]["title"], "Write final report");
    assert_eq!(json["data"]["description"], "Q3");
    assert_eq!(json["data"]["priority"], "high");
    assert_eq!(json["data"]["completed"], true);

    let (_, json) = send(&app, "PATCH", &format!("/{id}/toggle"), None).await;
    assert_eq!(json["message"], "Todo active");
    assert_eq!(json["data"]["completed"], false);

    let (_, json) = send(&app, "PATCH", &format!("/{id}/toggle"), None).await;
    assert_eq!(json["message"], "Todo completed");
    assert_eq!(json["data"]["completed"], true);

    let (status, json) = send(&app, "DELETE", &format!("/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Todo deleted");
    assert_eq!(json["data"]["_id"], id.as_str());

    let (status, json) = send(&app, "GET", &format!("/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["success"], false);
}

#[tokio::test]
async fn test_malformed_id_is_bad_request() {
    let app = app(InMemoryTodoRepository::new());

    for (method, uri) in [
        ("GET", "/not-a-uuid"),
        ("DELETE", "/not-a-uuid"),
        ("PATCH", "/not-a-uuid/toggle"),
    ] {
        let (status, json) = send(&app, method, uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{method} {uri}");
        assert_eq!(json["error"], "INVALID_ID");
    }
}

#[tokio::test]
async fn test_unknown_id_is_not_found() {
    let app = app(InMemoryTodoRepository::new());
    let id = uuid::Uuid::now_v7();

    let (status, _) = send(&app, "PATCH", &format!("/{id}/toggle"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "PUT", &format!("/{id}"), Some(json!({"title": "x"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_past_due_date_is_overdue_until_completed() {
    let app = app(InMemoryTodoRepository::new());
    let todo = create(&app, json!({"title": "Pay rent", "dueDate": "2020-01-01"})).await;
    assert_eq!(todo["isOverdue"], true);

    let id = todo["_id"].as_str().unwrap();
    let (_, json) = send(&app, "PATCH", &format!("/{id}/toggle"), None).await;
    assert_eq!(json["data"]["isOverdue"], false);
}

#[tokio::test]
async fn test_delete_completed_counts() {
    let app = app(InMemoryTodoRepository::new());
    create(&app, json!({"title": "keep"})).await;

    let (status, json) = send(&app, "DELETE", "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "0 todos deleted");
    assert_eq!(json["data"]["deletedCount"], 0);

    let done = create(&app, json!({"title": "done"})).await;
    let id = done["_id"].as_str().unwrap();
    send(&app, "PATCH", &format!("/{id}/toggle"), None).await;

    let (_, json) = send(&app, "DELETE", "/", None).await;
    assert_eq!(json["data"]["deletedCount"], 1);

    let (_, list) = send(&app, "GET", "/", None).await;
    assert_eq!(list["pagination"]["total"], 1);
    assert_eq!(list["data"][0]["title"], "keep");
}

#[tokio::test]
async fn test_summary() {
    let app = app(InMemoryTodoRepository::new());

    let (status, json) = send(&app, "GET", "/stats/summary", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json["data"],
        json!({
            "total": 0, "completed": 0, "pending": 0,
            "highPriority": 0, "mediumPriority": 0, "lowPriority": 0
        })
    );

    create(&app, json!({"title": "a", "priority": "high"})).await;
    let done = create(&app, json!({"title": "b", "priority": "low"})).await;
    let id = done["_id"].as_str().unwrap();
    send(&app, "PATCH", &format!("/{id}/toggle"), None).await;

    let (_, json) = send(&app, "GET", "/stats/summary", None).await;
    assert_eq!(
        json["data"],
        json!({
            "total": 2, "completed": 1, "pending": 1,
            "highPriority": 1, "mediumPriority": 0, "lowPriority": 1
        })
    );
}
