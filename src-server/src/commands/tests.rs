//! Handler tests driving the router directly

use axum::{
    body::{to_bytes, Body},
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::domain::DoseRule;
use crate::{build_router, AppState};

fn app() -> Router {
    build_router(AppState::in_memory(None))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create(app: &Router, refills: Option<u32>) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/medications",
        Some(json!({
            "name": "Metformin",
            "dosage": "500mg",
            "frequency": 2,
            "times": ["08:00", "20:00"],
            "refills": refills,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_create_assigns_id_and_defaults() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/medications",
        Some(json!({ "name": "Aspirin", "dosage": "81mg", "times": ["9:00"] })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(!body["id"].as_str().unwrap().is_empty());
    assert_eq!(body["times"], json!(["09:00"]));
    assert_eq!(body["history"], json!([]));
    assert_eq!(body["settings"]["notificationEnabled"], json!(true));
    assert!(body["createdAt"].is_string());

    let (_, list) = send(&app, Method::GET, "/api/medications", None).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_create_rejects_empty_times() {
    let (status, body) = send(
        &app(),
        Method::POST,
        "/api/medications",
        Some(json!({ "name": "Aspirin", "dosage": "81mg", "times": [] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_create_rejects_malformed_time() {
    let (status, _) = send(
        &app(),
        Method::POST,
        "/api/medications",
        Some(json!({ "name": "Aspirin", "dosage": "81mg", "times": ["25:00"] })),
    )
    .await;
    assert!(status.is_client_error());
}

#[tokio::test]
async fn test_get_and_update() {
    let app = app();
    let id = create(&app, Some(3)).await;

    let (status, body) = send(&app, Method::GET, &format!("/api/medications/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], json!("Metformin"));

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/medications/{id}"),
        Some(json!({ "dosage": "1000mg", "refills": null })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["dosage"], json!("1000mg"));
    assert_eq!(body["name"], json!("Metformin"));
    assert!(body["refills"].is_null());
}

#[tokio::test]
async fn test_missing_medication_is_404() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/api/medications/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "medication nope not found" }));

    let (status, _) = send(&app, Method::PUT, "/api/medications/nope", Some(json!({}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::POST, "/api/medications/nope/skip", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_twice() {
    let app = app();
    let id = create(&app, None).await;
    let uri = format!("/api/medications/{id}");

    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());

    let (_, list) = send(&app, Method::GET, "/api/medications", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn test_taken_decrements_refills() {
    let app = app();
    let id = create(&app, Some(1)).await;
    let uri = format!("/api/medications/{id}/taken");

    let (status, body) = send(&app, Method::POST, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["medication"]["refills"], json!(0));
    assert_eq!(body["historyEntry"]["status"], json!("taken"));
    assert_eq!(body["historyEntry"]["medicationId"], json!(id));
    assert_eq!(body["medication"]["history"].as_array().unwrap().len(), 1);

    let (_, body) = send(&app, Method::POST, &uri, None).await;
    assert_eq!(body["medication"]["refills"], json!(0));
}

#[tokio::test]
async fn test_taken_keeps_client_entry_id_and_time() {
    let app = app();
    let id = create(&app, None).await;

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/medications/{id}/taken"),
        Some(json!({
            "historyEntry": {
                "id": "client-1",
                "takenAt": "2024-05-01T08:00:00Z",
                "status": "skipped",
                "medicationName": "Something else",
            }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["historyEntry"]["id"], json!("client-1"));
    assert_eq!(body["historyEntry"]["takenAt"], json!("2024-05-01T08:00:00Z"));
    assert_eq!(body["historyEntry"]["status"], json!("taken"));
    assert_eq!(body["historyEntry"]["medicationName"], json!("Metformin"));
}

#[tokio::test]
async fn test_snooze_duration() {
    let app = app();
    let id = create(&app, Some(4)).await;
    let uri = format!("/api/medications/{id}/snooze");

    let (_, body) = send(&app, Method::POST, &uri, Some(json!({ "snoozeDuration": 15 }))).await;
    assert_eq!(body["historyEntry"]["status"], json!("snoozed"));
    assert_eq!(body["historyEntry"]["snoozeDuration"], json!(15));
    assert_eq!(body["medication"]["refills"], json!(4));

    let (_, body) = send(&app, Method::POST, &uri, None).await;
    assert_eq!(body["historyEntry"]["snoozeDuration"], json!(5));

    let (status, _) = send(&app, Method::POST, &uri, Some(json!({ "snoozeDuration": 0 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_history_lists_and_clears() {
    let app = app();
    let id = create(&app, None).await;
    send(&app, Method::POST, &format!("/api/medications/{id}/taken"), None).await;
    send(&app, Method::POST, &format!("/api/medications/{id}/skip"), None).await;

    let (_, history) = send(&app, Method::GET, "/api/history", None).await;
    let statuses: Vec<&str> = history
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["status"].as_str().unwrap())
        .collect();
    assert_eq!(statuses, vec!["taken", "skipped"]);

    let (status, _) = send(&app, Method::DELETE, "/api/history", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, history) = send(&app, Method::GET, "/api/history", None).await;
    assert_eq!(history, json!([]));
    let (_, med) = send(&app, Method::GET, &format!("/api/medications/{id}"), None).await;
    assert_eq!(med["history"], json!([]));
}

#[tokio::test]
async fn test_dose_rule_blocks_second_dose() {
    // Twelve hours either side of 08:00 covers every instant of the day
    let app = build_router(AppState::in_memory(Some(DoseRule::new(12 * 60))));
    let (_, body) = send(
        &app,
        Method::POST,
        "/api/medications",
        Some(json!({ "name": "Aspirin", "dosage": "81mg", "times": ["08:00"] })),
    )
    .await;
    let uri = format!("/api/medications/{}/taken", body["id"].as_str().unwrap());

    let (status, _) = send(&app, Method::POST, &uri, None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, Method::POST, &uri, None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body, json!({ "error": "already taken for this time slot" }));
}
