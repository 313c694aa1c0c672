// Errors surfaced by the dashboard handle
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DashboardError {
    #[error("dashboard update loop has stopped")]
    LoopStopped,
}
