// Dashboard domain model - the plain data handed to the presentation layer
use super::activity::ActivityEntry;
use super::metrics::{MetricTile, ResourceGauge};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn grid_color(self) -> &'static str {
        match self {
            Theme::Light => "#e2e8f0",
            Theme::Dark => "#334155",
        }
    }
}

/// Whether the update loop is cycling, and how often
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleState {
    pub running: bool,
    pub interval_millis: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub cycle: u64,
    pub clock: String,
    pub tiles: Vec<MetricTile>,
    pub resources: Vec<ResourceGauge>,
    pub series: Vec<f64>,
    pub capacity: usize,
    pub activity: Vec<ActivityEntry>,
    pub schedule: ScheduleState,
    pub theme: Theme,
    /// Rendered chart document; served on its own rather than inside the JSON body
    #[serde(skip)]
    pub chart_svg: String,
}
