// Domain layer - pure dashboard data and state
pub mod activity;
pub mod dashboard;
pub mod metrics;
pub mod series;
