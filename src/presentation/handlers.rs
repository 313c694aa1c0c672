// HTTP request handlers
use crate::presentation::app_state::AppState;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use pulse_dashboard::application::error::DashboardError;
use pulse_dashboard::domain::dashboard::{DashboardSnapshot, Theme};
use pulse_dashboard::infrastructure::chunked_json::stream_from_watch;
use pulse_dashboard::infrastructure::http_response::{accepts_brotli, json_response, svg_response};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Deserialize)]
pub struct IntervalRequest {
    pub millis: u64,
}

/// Body returned by every control endpoint
#[derive(Debug, Serialize, PartialEq)]
pub struct ControlResponse {
    pub running: bool,
    pub interval_millis: u64,
    pub theme: Theme,
    pub cycle: u64,
}

impl From<&DashboardSnapshot> for ControlResponse {
    fn from(snapshot: &DashboardSnapshot) -> Self {
        Self {
            running: snapshot.schedule.running,
            interval_millis: snapshot.schedule.interval_millis,
            theme: snapshot.theme,
            cycle: snapshot.cycle,
        }
    }
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Latest snapshot as JSON
pub async fn get_dashboard(headers: HeaderMap, State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let snapshot = state.dashboard.snapshot();

    match json_response(snapshot.as_ref(), accepts_brotli(&headers)).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

/// Chart of the latest snapshot as SVG
pub async fn get_chart(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let snapshot = state.dashboard.snapshot();

    match svg_response(snapshot.chart_svg.clone()) {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

/// Live snapshot stream, one frame per published snapshot
pub async fn stream_dashboard(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    stream_from_watch(state.dashboard.subscribe())
}

pub async fn pause(State(state): State<Arc<AppState>>) -> Response {
    control_response(state.dashboard.pause().await)
}

pub async fn resume(State(state): State<Arc<AppState>>) -> Response {
    control_response(state.dashboard.resume().await)
}

pub async fn toggle(State(state): State<Arc<AppState>>) -> Response {
    control_response(state.dashboard.toggle().await)
}

pub async fn set_interval(State(state): State<Arc<AppState>>, Json(request): Json<IntervalRequest>) -> Response {
    control_response(state.dashboard.set_interval(request.millis).await)
}

pub async fn reset(State(state): State<Arc<AppState>>) -> Response {
    control_response(state.dashboard.reset().await)
}

pub async fn toggle_theme(State(state): State<Arc<AppState>>) -> Response {
    control_response(state.dashboard.toggle_theme().await)
}

fn control_response(result: Result<Arc<DashboardSnapshot>, DashboardError>) -> Response {
    match result {
        Ok(snapshot) => Json(ControlResponse::from(snapshot.as_ref())).into_response(),
        Err(e) => {
            tracing::error!("Dashboard command failed: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, e.to_string()).into_response()
        }
    }
}
