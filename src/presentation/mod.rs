// Presentation layer - HTTP binding over the dashboard handle
pub mod app_state;
pub mod handlers;
