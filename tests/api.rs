use std::{sync::Arc, time::Duration};

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use neko_stopwatch::{
    api::create_router,
    settings::SettingsStore,
    state::AppState,
};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

fn app() -> (Router, Arc<AppState>, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let settings = SettingsStore::open(dir.path().join("settings.ini"));
    let state = Arc::new(AppState::new(
        0,
        "127.0.0.1".to_string(),
        settings,
        Duration::from_millis(100),
    ));
    (create_router(Arc::clone(&state)), state, dir)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

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

#[tokio::test]
async fn health() {
    let (app, _state, _dir) = app();
    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn start_pause_reset_cycle() {
    let (app, _state, _dir) = app();

    let (status, body) = send(&app, "POST", "/start", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["phase"], "running");

    let (_, body) = send(&app, "POST", "/pause", None).await;
    assert_eq!(body["phase"], "paused");

    let (_, body) = send(&app, "POST", "/reset", None).await;
    assert_eq!(body["phase"], "idle");
    assert_eq!(body["elapsed"], "00:00:00");
}

#[tokio::test]
async fn manual_time_accepts_strings_and_numbers() {
    let (app, _state, _dir) = app();

    let (status, body) = send(
        &app,
        "POST",
        "/manual-time",
        Some(json!({ "hours": "1", "minutes": 30, "seconds": "45" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["elapsed"], "01:30:45");
    assert_eq!(body["phase"], "idle");

    let (_, body) = send(&app, "GET", "/elapsed", None).await;
    assert_eq!(body["elapsed"], "01:30:45");
    assert_eq!(body["seconds"], 5445.0);
}

#[tokio::test]
async fn manual_time_with_missing_fields_defaults_to_zero() {
    let (app, _state, _dir) = app();
    let (status, body) = send(&app, "POST", "/manual-time", Some(json!({ "minutes": "2" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["elapsed"], "00:02:00");
}

#[tokio::test]
async fn invalid_manual_time_is_rejected_without_changes() {
    let (app, _state, _dir) = app();
    send(&app, "POST", "/manual-time", Some(json!({ "seconds": "9" }))).await;

    let (status, body) = send(
        &app,
        "POST",
        "/manual-time",
        Some(json!({ "hours": 0, "minutes": 75, "seconds": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["ok"], false);
    assert_eq!(body["field"], "minutes");
    assert_eq!(body["message"], "Invalid input");

    let (_, body) = send(&app, "GET", "/elapsed", None).await;
    assert_eq!(body["elapsed"], "00:00:09");
}

#[tokio::test]
async fn incremental_validation_marks_and_clears_fields() {
    let (app, _state, _dir) = app();

    let (_, body) = send(&app, "POST", "/validate", Some(json!({ "field": "minutes", "text": "abc" }))).await;
    assert_eq!(body["ok"], false);
    assert_eq!(body["message"], "Enter numbers only");

    let (_, body) = send(&app, "POST", "/validate", Some(json!({ "field": "minutes", "text": "61" }))).await;
    assert_eq!(body["message"], "Minutes/Seconds must be 0-59");

    let (_, status) = send(&app, "GET", "/status", None).await;
    assert_eq!(status["errored_fields"], json!(["minutes"]));

    let (_, body) = send(&app, "POST", "/validate", Some(json!({ "field": "minutes", "text": "45" }))).await;
    assert_eq!(body["ok"], true);

    let (_, status) = send(&app, "GET", "/status", None).await;
    assert_eq!(status["errored_fields"], json!([]));
}

#[tokio::test]
async fn commands_publish_display_value() {
    let (app, state, _dir) = app();
    send(&app, "POST", "/manual-time", Some(json!({ "hours": "12" }))).await;

    assert_eq!(state.get_display().text, "12:00:00");
    let (_, body) = send(&app, "GET", "/display", None).await;
    assert_eq!(body["text"], "12:00:00");
    assert_eq!(body["phase"], "idle");
}

#[tokio::test]
async fn settings_setters_update_and_persist() {
    let (app, state, dir) = app();

    let (status, body) = send(&app, "GET", "/settings", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["font"], "Arial");

    let (status, body) = send(&app, "PUT", "/settings/font", Some(json!({ "value": "Courier" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["font"], "Courier");

    let (_, body) = send(&app, "PUT", "/settings/font-size", Some(json!({ "value": 55 }))).await;
    assert_eq!(body["font_size"], 55);

    send(&app, "PUT", "/settings/text-color", Some(json!({ "value": "#FFFFFF" }))).await;
    let (_, body) = send(&app, "PUT", "/settings/bg-color", Some(json!({ "value": "#000000" }))).await;
    assert_eq!(body["text_color"], "#FFFFFF");
    assert_eq!(body["bg_color"], "#000000");

    let reloaded = SettingsStore::open(dir.path().join("settings.ini"));
    assert_eq!(reloaded.record(), &state.get_settings().unwrap());
}

#[tokio::test]
async fn settings_boundary_rejects_bad_values() {
    let (app, state, _dir) = app();

    let (status, _) = send(&app, "PUT", "/settings/font-size", Some(json!({ "value": 41 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "PUT", "/settings/bg-color", Some(json!({ "value": "#12345" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "PUT", "/settings/font", Some(json!({ "value": "  " }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert_eq!(state.get_settings().unwrap(), Default::default());
}

#[tokio::test]
async fn display_ticker_refreshes_while_running() {
    let (app, state, _dir) = app();
    let ticker = tokio::spawn(neko_stopwatch::tasks::display_ticker_task(Arc::clone(&state)));
    tokio::time::sleep(Duration::from_millis(50)).await;

    send(&app, "POST", "/start", None).await;
    tokio::time::sleep(Duration::from_millis(1300)).await;

    let display = state.get_display();
    assert_eq!(display.text, "00:00:01");
    assert_eq!(display.phase, neko_stopwatch::TimerPhase::Running);

    send(&app, "POST", "/pause", None).await;
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(state.get_display().phase, neko_stopwatch::TimerPhase::Paused);

    ticker.abort();
}

#[tokio::test]
async fn non_integer_json_fields_get_validation_result() {
    let (app, _state, _dir) = app();

    let (status, body) = send(&app, "POST", "/manual-time", Some(json!({ "minutes": -1 }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["field"], "minutes");
    assert_eq!(body["message"], "Invalid input");

    let (status, body) = send(&app, "POST", "/manual-time", Some(json!({ "hours": 1.5 }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["field"], "hours");
}

#[tokio::test]
async fn largest_offset_does_not_break_later_commands() {
    let (app, _state, _dir) = app();
    let hours = neko_stopwatch::validation::MAX_HOURS;

    let (status, _) = send(
        &app,
        "POST",
        "/manual-time",
        Some(json!({ "hours": hours, "minutes": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send(&app, "POST", "/manual-time", Some(json!({ "hours": hours }))).await;
    assert_eq!(status, StatusCode::OK);
    send(&app, "POST", "/start", None).await;

    let (status, _) = send(&app, "GET", "/elapsed", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, "POST", "/reset", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["elapsed"], "00:00:00");
}
