use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use magi::ephemeris::BackendStatus;
use magi::{BackendKind, SynastryReport};
use serde::Serialize;
use std::sync::Arc;

use super::{AppState, WebError};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: String,
    pub backends: Vec<BackendStatus>,
}

pub async fn report_text(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, WebError> {
    let report = compute_report(&state).await?;
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        report.render_text(),
    ))
}

pub async fn report_json(State(state): State<Arc<AppState>>) -> Result<Json<SynastryReport>, WebError> {
    compute_report(&state).await.map(Json)
}

pub async fn health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<HealthResponse>) {
    let ephemerides = state.resolver.ephemerides();
    let backends = ephemerides.status();

    if ephemerides.is_ready(BackendKind::Classical) {
        let message = if ephemerides.is_ready(BackendKind::MinorBody) {
            "Magi service is running and both ephemeris sources are ready.".to_string()
        } else {
            "Magi service is running; minor-body ephemeris unavailable, Chiron reads 0°.".to_string()
        };
        (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok",
                message,
                backends,
            }),
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse {
                status: "error",
                message: "Classical ephemeris failed to initialise.".to_string(),
                backends,
            }),
        )
    }
}

pub async fn not_found() -> WebError {
    WebError::not_found("Not found")
}

/// Runs the blocking pipeline off the async workers, bounded by the request timeout.
async fn compute_report(state: &Arc<AppState>) -> Result<SynastryReport, WebError> {
    let worker = Arc::clone(state);
    let task = tokio::task::spawn_blocking(move || {
        let [first, second] = &worker.charts;
        SynastryReport::compute(&worker.resolver, &worker.engine, first, second)
    });

    match tokio::time::timeout(state.request_timeout, task).await {
        Err(_) => Err(WebError::timeout(format!(
            "Report generation exceeded {}s",
            state.request_timeout.as_secs_f64()
        ))),
        Ok(Err(join_err)) => Err(WebError::internal(format!("Report task failed: {join_err}"))),
        Ok(Ok(result)) => result.map_err(WebError::from),
    }
}
