#![cfg(feature = "web")]
use axum::{
    Json, Router,
    extract::State,
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use log::{error, info, warn};
use serde::Serialize;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;

use crate::automation::{self, RunSettings};
use crate::config::Config;
use crate::dashboard::{self, DashboardSummary};
use crate::error::AppError;
use crate::grid::Projection;
use crate::mailer::Notifier;
use crate::preview;
use crate::sheets::SheetBackend;

pub struct AppState<S, N> {
    pub sheets: S,
    pub mailer: N,
    pub settings: RunSettings,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

/// Table rows and their aggregates, taken from the same read
#[derive(Serialize)]
struct DashboardResponse {
    #[serde(flatten)]
    projection: Projection,
    summary: DashboardSummary,
}

#[derive(Serialize)]
struct ExecuteResponse {
    message: String,
    processed: usize,
}

/// Build the router over an already-constructed state
///
/// `static_dir` is served under `/static`.
pub fn router<S, N>(state: Arc<AppState<S, N>>, static_dir: &str) -> Router
where
    S: SheetBackend + 'static,
    N: Notifier + 'static,
{
    Router::new()
        .route("/", get(serve_dashboard))
        .route("/dashboard.js", get(serve_dashboard_script))
        .route("/health", get(health))
        .route("/api/preview", get(get_preview::<S, N>))
        .route("/api/dashboard", get(get_dashboard::<S, N>))
        .route("/api/execute", post(execute::<S, N>))
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
}

pub async fn run<S, N>(config: Config, sheets: S, mailer: N) -> Result<(), Box<dyn std::error::Error>>
where
    S: SheetBackend + 'static,
    N: Notifier + 'static,
{
    let app_state = Arc::new(AppState {
        sheets,
        mailer,
        settings: config.run_settings(),
    });

    let app = router(app_state, &config.static_dir);

    let listener = TcpListener::bind(config.bind_addr()).await?;
    info!("Listening on http://{}", config.bind_addr());
    axum::serve(listener, app).await?;

    Ok(())
}

async fn serve_dashboard() -> Html<&'static str> {
    Html(include_str!("./static/dashboard.html"))
}

async fn serve_dashboard_script() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        include_str!("./static/dashboard.js"),
    )
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "ok": true }))
}

fn read_failure(e: &AppError) -> Response {
    error!("Failed to read spreadsheet: {}", e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: "Unable to read data from the spreadsheet".to_string(),
            details: Some(e.to_string()),
        }),
    )
        .into_response()
}

async fn get_preview<S, N>(State(state): State<Arc<AppState<S, N>>>) -> Response
where
    S: SheetBackend + 'static,
    N: Notifier + 'static,
{
    match preview::preview(&state.sheets, state.settings.columns).await {
        Ok(projection) => Json(projection).into_response(),
        Err(e) => read_failure(&e),
    }
}

async fn get_dashboard<S, N>(State(state): State<Arc<AppState<S, N>>>) -> Response
where
    S: SheetBackend + 'static,
    N: Notifier + 'static,
{
    match preview::preview(&state.sheets, state.settings.columns).await {
        Ok(projection) => {
            let summary = dashboard::summarize(&projection, &state.settings.headers);
            Json(DashboardResponse {
                projection,
                summary,
            })
            .into_response()
        }
        Err(e) => read_failure(&e),
    }
}

async fn execute<S, N>(State(state): State<Arc<AppState<S, N>>>) -> Response
where
    S: SheetBackend + 'static,
    N: Notifier + 'static,
{
    match automation::run(&state.sheets, &state.mailer, &state.settings).await {
        Ok(summary) => {
            info!(
                "Automation finished: {} processed, {} already replied, {} incomplete",
                summary.processed, summary.already_replied, summary.incomplete
            );
            Json(ExecuteResponse {
                message: "Execution complete".to_string(),
                processed: summary.processed,
            })
            .into_response()
        }
        Err(e) if e.is_validation() => {
            warn!("Automation rejected: {}", e);
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: e.to_string(),
                    details: None,
                }),
            )
                .into_response()
        }
        Err(e) => {
            error!("Automation failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to run the automation".to_string(),
                    details: None,
                }),
            )
                .into_response()
        }
    }
}
