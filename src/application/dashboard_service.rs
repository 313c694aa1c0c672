// Dashboard service - one refresh cycle over generator, series, activity log and chart
use crate::application::chart_renderer::ChartRenderer;
use crate::domain::activity::{ActivityLog, RESET_ACTIVITY};
use crate::domain::dashboard::{DashboardSnapshot, ScheduleState, Theme};
use crate::domain::metrics::{MetricKind, MetricTile, RandomMetricGenerator, ResourceGauge, ResourceKind};
use crate::domain::series::RollingSeriesBuffer;
use crate::infrastructure::config::DashboardConfig;
use crate::infrastructure::svg_surface::SvgSurface;
use chrono::{DateTime, Local};

pub struct DashboardService {
    generator: RandomMetricGenerator,
    series: RollingSeriesBuffer,
    activity: ActivityLog,
    renderer: ChartRenderer,
    surface: SvgSurface,
    theme: Theme,
    tiles: Vec<MetricTile>,
    resources: Vec<ResourceGauge>,
    clock: String,
    cycle: u64,
}

impl DashboardService {
    pub fn new(config: &DashboardConfig) -> Self {
        let series = RollingSeriesBuffer::new(config.series.capacity);
        let renderer = ChartRenderer::new(series.capacity());

        let mut service = Self {
            generator: RandomMetricGenerator::new(config.generator.seed),
            series,
            activity: ActivityLog::new(config.activity.capacity),
            renderer,
            surface: SvgSurface::new(config.chart.width, config.chart.height),
            theme: Theme::default(),
            tiles: Vec::new(),
            resources: Vec::new(),
            clock: String::new(),
            cycle: 0,
        };

        let generator = &mut service.generator;
        service.series.seed(config.series.seed_count, || generator.sample());
        service.refresh_metrics(Local::now());
        service.render_chart();
        service
    }

    /// One full cycle: clock, metrics, one new sample, one activity entry, chart
    pub fn run_cycle(&mut self) {
        self.run_cycle_at(Local::now());
    }

    pub fn run_cycle_at(&mut self, now: DateTime<Local>) {
        self.refresh_metrics(now);

        let sample = self.generator.sample();
        self.series.append(sample);

        let template = self.generator.activity();
        self.activity.record_template(template, activity_timestamp(now));

        self.render_chart();
        self.cycle += 1;

        tracing::debug!(
            cycle = self.cycle,
            sample,
            activity = template.title,
            "dashboard cycle complete"
        );
    }

    /// Empty the series and the feed, then repopulate tiles, gauges and chart.
    /// No sample is appended, so the chart shows the bare grid until the next cycle.
    pub fn reset(&mut self) {
        self.reset_at(Local::now());
    }

    pub fn reset_at(&mut self, now: DateTime<Local>) {
        self.series.clear();
        self.activity.clear();
        self.refresh_metrics(now);
        self.activity.record_template(&RESET_ACTIVITY, activity_timestamp(now));
        self.render_chart();

        tracing::info!(cycle = self.cycle, "dashboard data reset");
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        if self.theme != theme {
            self.theme = theme;
            self.render_chart();
        }
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.set_theme(self.theme.toggled());
        self.theme
    }

    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    pub fn series(&self) -> &RollingSeriesBuffer {
        &self.series
    }

    pub fn activity(&self) -> &ActivityLog {
        &self.activity
    }

    pub fn snapshot(&self, schedule: ScheduleState) -> DashboardSnapshot {
        DashboardSnapshot {
            cycle: self.cycle,
            clock: self.clock.clone(),
            tiles: self.tiles.clone(),
            resources: self.resources.clone(),
            series: self.series.snapshot(),
            capacity: self.series.capacity(),
            activity: self.activity.entries(),
            schedule,
            theme: self.theme,
            chart_svg: self.surface.to_document(),
        }
    }

    fn refresh_metrics(&mut self, now: DateTime<Local>) {
        self.clock = clock_display(now);
        self.tiles = MetricKind::ALL
            .iter()
            .map(|kind| self.generator.tile(*kind))
            .collect();
        self.resources = ResourceKind::ALL
            .iter()
            .map(|kind| self.generator.gauge(*kind))
            .collect();
    }

    fn render_chart(&mut self) {
        let samples = self.series.snapshot();
        self.renderer.render(&samples, self.theme, &mut self.surface);
    }
}

/// Wall clock shown in the header, 24-hour "HH:MM:SS"
pub fn clock_display(now: DateTime<Local>) -> String {
    now.format("%H:%M:%S").to_string()
}

/// Activity feed timestamp, 12-hour "HH:MM AM"
pub fn activity_timestamp(now: DateTime<Local>) -> String {
    now.format("%I:%M %p").to_string()
}
