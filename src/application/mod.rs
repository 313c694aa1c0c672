// Application layer - chart rendering, scheduling and the update loop
pub mod chart_renderer;
pub mod dashboard_service;
pub mod error;
pub mod scheduler;
pub mod update_loop;
