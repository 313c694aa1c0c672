use crate::application::scheduler::{clamp_interval, DEFAULT_INTERVAL_MILLIS};
use crate::domain::activity::DEFAULT_ACTIVITY_CAPACITY;
use crate::domain::series::DEFAULT_SERIES_CAPACITY;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct DashboardConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub schedule: ScheduleSettings,
    #[serde(default)]
    pub series: SeriesSettings,
    #[serde(default)]
    pub activity: ActivitySettings,
    #[serde(default)]
    pub chart: ChartSettings,
    #[serde(default)]
    pub generator: GeneratorSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_bind")]
    pub bind: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ScheduleSettings {
    #[serde(default = "default_interval_millis")]
    pub interval_millis: u64,
    #[serde(default)]
    pub start_paused: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SeriesSettings {
    #[serde(default = "default_series_capacity")]
    pub capacity: usize,
    #[serde(default = "default_seed_count")]
    pub seed_count: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ActivitySettings {
    #[serde(default = "default_activity_capacity")]
    pub capacity: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChartSettings {
    #[serde(default = "default_chart_width")]
    pub width: f64,
    #[serde(default = "default_chart_height")]
    pub height: f64,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct GeneratorSettings {
    /// Fixed rng seed for reproducible runs
    pub seed: Option<u64>,
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_interval_millis() -> u64 {
    DEFAULT_INTERVAL_MILLIS
}

fn default_series_capacity() -> usize {
    DEFAULT_SERIES_CAPACITY
}

fn default_seed_count() -> usize {
    10
}

fn default_activity_capacity() -> usize {
    DEFAULT_ACTIVITY_CAPACITY
}

fn default_chart_width() -> f64 {
    600.0
}

fn default_chart_height() -> f64 {
    300.0
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self { bind: default_bind() }
    }
}

impl Default for ScheduleSettings {
    fn default() -> Self {
        Self {
            interval_millis: default_interval_millis(),
            start_paused: false,
        }
    }
}

impl Default for SeriesSettings {
    fn default() -> Self {
        Self {
            capacity: default_series_capacity(),
            seed_count: default_seed_count(),
        }
    }
}

impl Default for ActivitySettings {
    fn default() -> Self {
        Self {
            capacity: default_activity_capacity(),
        }
    }
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            width: default_chart_width(),
            height: default_chart_height(),
        }
    }
}

impl ScheduleSettings {
    /// Configured interval clamped to the range the scheduler accepts
    pub fn effective_interval_millis(&self) -> u64 {
        clamp_interval(self.interval_millis)
    }
}

/// Load `config/dashboard.*` (optional) overlaid with `PULSE_*` environment variables
pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/dashboard").required(false))
        .add_source(
            config::Environment::with_prefix("PULSE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{Config, File, FileFormat};

    fn from_toml(source: &str) -> DashboardConfig {
        Config::builder()
            .add_source(File::from_str(source, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_empty_source_uses_defaults() {
        let config = from_toml("");

        assert_eq!(config.server.bind, "0.0.0.0:8080");
        assert_eq!(config.schedule.interval_millis, 1500);
        assert!(!config.schedule.start_paused);
        assert_eq!(config.series.capacity, 20);
        assert_eq!(config.series.seed_count, 10);
        assert_eq!(config.activity.capacity, 10);
        assert_eq!(config.chart.width, 600.0);
        assert_eq!(config.generator.seed, None);
    }

    #[test]
    fn test_partial_override() {
        let config = from_toml(
            r#"
            [schedule]
            interval_millis = 500
            start_paused = true

            [series]
            capacity = 30

            [generator]
            seed = 99
            "#,
        );

        assert_eq!(config.schedule.interval_millis, 500);
        assert!(config.schedule.start_paused);
        assert_eq!(config.series.capacity, 30);
        assert_eq!(config.series.seed_count, 10);
        assert_eq!(config.generator.seed, Some(99));
    }

    #[test]
    fn test_interval_is_clamped() {
        let config = from_toml("[schedule]\ninterval_millis = 20");
        assert_eq!(config.schedule.effective_interval_millis(), 100);

        let config = from_toml("[schedule]\ninterval_millis = 120000");
        assert_eq!(config.schedule.effective_interval_millis(), 10_000);
    }
}
