// Application state for HTTP handlers
use pulse_dashboard::application::update_loop::DashboardHandle;

#[derive(Clone)]
pub struct AppState {
    pub dashboard: DashboardHandle,
}
