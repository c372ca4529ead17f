use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header::CONTENT_TYPE},
};
use chrono::Utc;
use database::entities::course_overview;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, ConnectOptions, Database, DatabaseConnection};
use serde_json::{Value, json};
use server::{app, state::AppState};
use tower::ServiceExt;

const DEMO: &str = "course-v1:edX+DemoX+2024_T1";
const RUST: &str = "course-v1:edX+Rust101+2024_T2";

async fn setup() -> (Router, DatabaseConnection) {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(options).await.unwrap();
    Migrator::up(&db, None).await.unwrap();

    (app(AppState::new(db.clone())), db)
}

async fn seed_course(db: &DatabaseConnection, id: &str, org: &str, display_name: &str) {
    let now = Utc::now().naive_utc();
    let key: models::course_key::CourseKey = id.parse().unwrap();

    course_overview::ActiveModel {
        id: Set(id.to_string()),
        org: Set(org.to_string()),
        number: Set(key.number().to_string()),
        run: Set(key.run().to_string()),
        display_name: Set(display_name.to_string()),
        language: Set(Some("en".to_string())),
        catalog_visibility: Set("both".to_string()),
        self_paced: Set(false),
        invitation_only: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await
    .unwrap();
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => request.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

    let value = if bytes.is_empty() {
        Value::Null
    } else {
        // Plain text bodies such as the health check come back as strings
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };

    (status, value)
}

#[tokio::test]
async fn test_health_and_openapi() {
    let (app, _) = setup().await;

    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!("OK"));

    let (status, body) = send(&app, Method::GET, "/api-docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/v0/flexible-catalogs/{lookup}"].is_object());
}

#[tokio::test]
async fn test_unknown_catalog_is_not_found() {
    let (app, _) = setup().await;

    let (status, body) = send(&app, Method::GET, "/api/v0/flexible-catalogs/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "catalog_not_found");

    let (status, _) = send(&app, Method::DELETE, "/api/v0/flexible-catalogs/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_rejected_requests_use_error_body() {
    let (app, _) = setup().await;

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/v0/fixed-catalogs/not-a-uuid",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_path");
    assert!(body["detail"].is_string());

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/v0/fixed-catalogs?created_after=yesterday",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_query");

    // Missing required field
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v0/dynamic-catalogs",
        Some(json!({"slug": "nameless"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "invalid_body");

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v0/dynamic-catalogs")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from("{\"name\": "))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"], "invalid_body");
}

#[tokio::test]
async fn test_duplicate_slug_conflicts() {
    let (app, _) = setup().await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v0/dynamic-catalogs",
        Some(json!({"name": "Spring", "slug": "spring"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v0/catalog-courses",
        Some(json!({"name": "Also spring", "slug": "spring"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "duplicate_slug");
}

#[tokio::test]
async fn test_listing_ordering() {
    let (app, _) = setup().await;

    for name in ["Beta", "Alpha", "Gamma"] {
        send(
            &app,
            Method::POST,
            "/api/v0/dynamic-catalogs",
            Some(json!({"name": name})),
        )
        .await;
    }

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/v0/flexible-catalogs?ordering=-name",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Gamma", "Beta", "Alpha"]);

    // A literal percent sign matches no names
    let (status, body) = send(
        &app,
        Method::GET,
        "/api/v0/flexible-catalogs?name=%25",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/v0/flexible-catalogs?ordering=popularity",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_ordering");
}

#[tokio::test]
async fn test_fixed_catalog_membership() {
    let (app, db) = setup().await;
    seed_course(&db, DEMO, "edX", "Demo Course").await;
    seed_course(&db, RUST, "edX", "Intro to Rust").await;

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/v0/fixed-catalogs",
        Some(json!({"name": "Picks", "slug": "picks", "course_runs": [DEMO]})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["kind"], "fixed");
    assert_eq!(created["course_runs"], json!([DEMO]));
    let id = created["id"].as_str().unwrap().to_string();

    let (status, updated) = send(
        &app,
        Method::POST,
        &format!("/api/v0/fixed-catalogs/{id}/course-runs"),
        Some(json!({"members": [RUST, DEMO]})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["course_runs"], json!([DEMO, RUST]));

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/v0/fixed-catalogs/{id}/course-runs"),
        Some(json!({"members": [{"id": 1}]})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_reference");

    let (status, body) = send(
        &app,
        Method::DELETE,
        &format!("/api/v0/fixed-catalogs/{id}/course-runs"),
        Some(json!({"members": []})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "empty_input");

    let (status, members) = send(
        &app,
        Method::GET,
        "/api/v0/flexible-catalogs/picks/members",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(members["count"], 2);
    assert_eq!(members["course_runs"][1]["display_name"], "Intro to Rust");

    let (status, _) = send(
        &app,
        Method::GET,
        &format!("/api/v0/dynamic-catalogs/{id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_dynamic_catalog_query() {
    let (app, db) = setup().await;
    seed_course(&db, DEMO, "edX", "Demo Course").await;

    let (_, created) = send(
        &app,
        Method::POST,
        "/api/v0/dynamic-catalogs",
        Some(json!({"name": "Broken", "query_string": "[1, 2]"})),
    )
    .await;
    let id = created["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/api/v0/flexible-catalogs/{id}/members"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_query_shape");

    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/api/v0/dynamic-catalogs/{id}/query"),
        Some(json!({"query_string": r#"{"org": "edX"}"#})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["query_string"], r#"{"org": "edX"}"#);

    let (_, members) = send(
        &app,
        Method::GET,
        &format!("/api/v0/flexible-catalogs/{id}/members"),
        None,
    )
    .await;
    assert_eq!(members["course_runs"][0]["id"], DEMO);
}

#[tokio::test]
async fn test_available_course_lifecycle() {
    let (app, db) = setup().await;
    seed_course(&db, DEMO, "edX", "Demo Course").await;
    let path = format!("/api/v0/available-courses/{DEMO}");

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/v0/available-courses",
        Some(json!({"course_id": DEMO})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["active"], false);

    let (status, again) = send(
        &app,
        Method::POST,
        "/api/v0/available-courses",
        Some(json!({"course_id": DEMO, "active": true})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(again, created);

    let (status, updated) = send(&app, Method::PATCH, &path, Some(json!({"active": true}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["active"], true);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v0/available-courses",
        Some(json!({"course_id": RUST})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "course_not_found");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v0/available-courses",
        Some(json!({"course_id": "not a key"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_course_key");

    let (status, _) = send(&app, Method::DELETE, &path, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, Method::DELETE, &path, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
