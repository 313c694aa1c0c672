// Main entry point - configuration, update loop and server setup
mod presentation;

use std::{net::SocketAddr, sync::Arc};
use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use pulse_dashboard::application::dashboard_service::DashboardService;
use pulse_dashboard::application::scheduler::UpdateScheduler;
use pulse_dashboard::application::update_loop::UpdateLoop;
use pulse_dashboard::infrastructure::config::load_dashboard_config;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    get_chart, get_dashboard, health_check, pause, reset, resume, set_interval, stream_dashboard,
    toggle, toggle_theme,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = load_dashboard_config()?;

    // Create the dashboard state and start cycling (application layer)
    let service = DashboardService::new(&config);
    let scheduler = UpdateScheduler::new(
        config.schedule.effective_interval_millis(),
        !config.schedule.start_paused,
    );
    let (dashboard, update_task) = UpdateLoop::spawn(service, scheduler);

    let state = Arc::new(AppState { dashboard });

    // Build router (presentation layer)
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/dashboard", get(get_dashboard))
        .route("/dashboard/chart.svg", get(get_chart))
        .route("/dashboard/stream", get(stream_dashboard))
        .route("/dashboard/pause", post(pause))
        .route("/dashboard/resume", post(resume))
        .route("/dashboard/toggle", post(toggle))
        .route("/dashboard/interval", put(set_interval))
        .route("/dashboard/reset", post(reset))
        .route("/dashboard/theme", post(toggle_theme))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr: SocketAddr = config.server.bind.parse()?;
    tracing::info!(%addr, "starting pulse-dashboard");

    // Stopping the update loop closes the snapshot channel, which ends open streams
    let shutdown = async move {
        shutdown_signal().await;
        update_task.abort();
    };

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router)
        .with_graceful_shutdown(shutdown)
        .await?;

    tracing::info!("pulse-dashboard stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("shutdown requested");
}
