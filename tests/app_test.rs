#![cfg(feature = "web")]

mod common;

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use common::{MemorySheet, RecordingMailer, grid};
use serde_json::{Value, json};
use sheet_autoreply::app::{AppState, router};
use sheet_autoreply::automation::RunSettings;
use std::sync::Arc;
use tower::ServiceExt;

fn state(sheet: MemorySheet) -> Arc<AppState<MemorySheet, RecordingMailer>> {
    Arc::new(AppState {
        sheets: sheet,
        mailer: RecordingMailer::default(),
        settings: RunSettings::default(),
    })
}

async fn call(
    state: Arc<AppState<MemorySheet, RecordingMailer>>,
    method: &str,
    uri: &str,
) -> (StatusCode, Value) {
    let response = router(state, "static")
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

fn responses_sheet() -> MemorySheet {
    MemorySheet::new(grid(&[
        &["時間戳記", "姓名", "Email", "是否自動回覆"],
        &["2023/10/01 12:00", "Amy", "amy@example.com", ""],
        &["2023/10/02 12:00", "Ben", "ben@example.com", "Y"],
    ]))
}

#[tokio::test]
async fn health_is_ok() {
    let (status, body) = call(state(MemorySheet::new(Vec::new())), "GET", "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "ok": true }));
}

#[tokio::test]
async fn preview_returns_headers_and_rows() {
    let (status, body) = call(state(responses_sheet()), "GET", "/api/preview").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["headers"], json!(["時間戳記", "姓名", "Email", "是否自動回覆"]));
    assert_eq!(body["data"][0]["姓名"], "Amy");
    assert_eq!(body["data"][0]["_rowIndex"], 2);
    assert_eq!(body["data"][1]["是否自動回覆"], "Y");
}

#[tokio::test]
async fn preview_of_empty_sheet_is_empty() {
    let (status, body) = call(state(MemorySheet::new(Vec::new())), "GET", "/api/preview").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "headers": [], "data": [] }));
}

#[tokio::test]
async fn preview_backend_failure_is_500_with_details() {
    let mut sheet = MemorySheet::new(Vec::new());
    sheet.fail_reads = true;
    let (status, body) = call(state(sheet), "GET", "/api/preview").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].is_string());
    assert!(body["details"].as_str().unwrap().contains("backend unavailable"));
}

#[tokio::test]
async fn dashboard_returns_rows_and_summary_from_one_read() {
    let state = state(responses_sheet());
    let (status, body) = call(state.clone(), "GET", "/api/dashboard").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(state.sheets.reads(), vec!["'Sheet1'!A:Z".to_string()]);

    assert_eq!(body["headers"], json!(["時間戳記", "姓名", "Email", "是否自動回覆"]));
    assert_eq!(body["data"][0]["姓名"], "Amy");
    assert_eq!(body["data"][1]["_rowIndex"], 3);

    let summary = &body["summary"];
    assert_eq!(summary["total"], 2);
    assert_eq!(summary["replied"], 1);
    assert_eq!(summary["pending"], 1);
    assert_eq!(summary["dateField"], "時間戳記");
    assert_eq!(
        summary["trend"],
        json!([
            { "date": "2023-10-01", "count": 1 },
            { "date": "2023-10-02", "count": 1 }
        ])
    );
    println!("✓ table and summary served from a single sheet read");
}

#[tokio::test]
async fn dashboard_of_empty_sheet_is_empty() {
    let (status, body) = call(state(MemorySheet::new(Vec::new())), "GET", "/api/dashboard").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["headers"], json!([]));
    assert_eq!(body["data"], json!([]));
    assert_eq!(body["summary"]["total"], 0);
}

#[tokio::test]
async fn dashboard_backend_failure_is_500_with_details() {
    let mut sheet = MemorySheet::new(Vec::new());
    sheet.fail_reads = true;
    let (status, body) = call(state(sheet), "GET", "/api/dashboard").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["details"].is_string());
}

#[tokio::test]
async fn execute_reports_processed_count() {
    let state = state(responses_sheet());
    let (status, body) = call(state.clone(), "POST", "/api/execute").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["processed"], 1);
    assert!(body["message"].is_string());
    assert_eq!(state.mailer.sent().len(), 1);
    assert_eq!(state.sheets.writes(), vec![("'Sheet1'!D2".to_string(), "Y".to_string())]);
}

#[tokio::test]
async fn execute_with_missing_columns_is_400() {
    let sheet = MemorySheet::new(grid(&[&["Name", "Email"], &["Amy", "amy@example.com"]]));
    let state = state(sheet);
    let (status, body) = call(state.clone(), "POST", "/api/execute").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("姓名"));
    assert!(state.mailer.sent().is_empty());
}

#[tokio::test]
async fn execute_on_empty_sheet_is_400() {
    let (status, body) = call(state(MemorySheet::new(Vec::new())), "POST", "/api/execute").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn execute_backend_failure_is_500_without_details() {
    let mut sheet = MemorySheet::new(Vec::new());
    sheet.fail_reads = true;
    let (status, body) = call(state(sheet), "POST", "/api/execute").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].is_string());
    assert!(body.get("details").is_none());
}

#[tokio::test]
async fn dashboard_page_and_script_are_served() {
    let response = router(state(MemorySheet::new(Vec::new())), "static")
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert!(String::from_utf8_lossy(&html).contains("/dashboard.js"));

    let response = router(state(MemorySheet::new(Vec::new())), "static")
        .oneshot(Request::builder().uri("/dashboard.js").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response.headers()["content-type"]
            .to_str()
            .unwrap()
            .starts_with("application/javascript")
    );
}
