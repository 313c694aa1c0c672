// Metric domain model - KPI tiles, resource gauges and the random generator behind them
use super::activity::{ActivityTemplate, ACTIVITY_CATALOG};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::ops::Range;

/// Chart samples are drawn from this range
pub const SAMPLE_RANGE: Range<u32> = 20..120;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    Visitors,
    Revenue,
    Orders,
    Performance,
}

impl MetricKind {
    pub const ALL: [MetricKind; 4] = [
        MetricKind::Visitors,
        MetricKind::Revenue,
        MetricKind::Orders,
        MetricKind::Performance,
    ];

    pub fn value_range(self) -> Range<u32> {
        match self {
            MetricKind::Visitors => 5_000..15_000,
            MetricKind::Revenue => 25_000..75_000,
            MetricKind::Orders => 200..700,
            MetricKind::Performance => 70..100,
        }
    }

    /// Range of the cosmetic change indicator shown next to the tile.
    /// It is not derived from the value history.
    pub fn change_range(self) -> Range<f64> {
        match self {
            MetricKind::Visitors => -5.0..15.0,
            MetricKind::Revenue => -2.0..13.0,
            MetricKind::Orders => -10.0..15.0,
            MetricKind::Performance => -2.0..8.0,
        }
    }

    pub fn format_value(self, value: u32) -> String {
        match self {
            MetricKind::Revenue => format!("${}", group_thousands(value)),
            MetricKind::Performance => format!("{}%", value),
            MetricKind::Visitors | MetricKind::Orders => group_thousands(value),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Cpu,
    Memory,
    Storage,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 3] = [ResourceKind::Cpu, ResourceKind::Memory, ResourceKind::Storage];

    pub fn percent_range(self) -> Range<u32> {
        match self {
            ResourceKind::Cpu => 30..70,
            ResourceKind::Memory => 25..75,
            ResourceKind::Storage => 20..80,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Positive,
    Negative,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricTile {
    pub kind: MetricKind,
    pub value: u32,
    pub display: String,
    pub change_percent: f64,
    pub change_display: String,
    pub trend: Trend,
}

impl MetricTile {
    pub fn new(kind: MetricKind, value: u32, change_percent: f64) -> Self {
        let trend = if change_percent >= 0.0 {
            Trend::Positive
        } else {
            Trend::Negative
        };
        let sign = if trend == Trend::Positive { "+" } else { "" };

        Self {
            kind,
            value,
            display: kind.format_value(value),
            change_percent,
            change_display: format!("{}{:.1}%", sign, change_percent),
            trend,
        }
    }
}

/// Color band of a progress bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GaugeLevel {
    Normal,
    Warning,
    Critical,
}

impl GaugeLevel {
    pub fn for_percent(percent: u32) -> Self {
        if percent > 80 {
            GaugeLevel::Critical
        } else if percent > 60 {
            GaugeLevel::Warning
        } else {
            GaugeLevel::Normal
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceGauge {
    pub kind: ResourceKind,
    pub percent: u32,
    pub level: GaugeLevel,
}

impl ResourceGauge {
    pub fn new(kind: ResourceKind, percent: u32) -> Self {
        Self {
            kind,
            percent,
            level: GaugeLevel::for_percent(percent),
        }
    }
}

/// Produces bounded pseudo-random values per metric category.
///
/// Every call is independent of the previous ones; the only state is the rng.
#[derive(Debug, Clone)]
pub struct RandomMetricGenerator {
    rng: StdRng,
}

impl RandomMetricGenerator {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }

    pub fn metric(&mut self, kind: MetricKind) -> u32 {
        self.rng.gen_range(kind.value_range())
    }

    pub fn change(&mut self, kind: MetricKind) -> f64 {
        self.rng.gen_range(kind.change_range())
    }

    pub fn resource(&mut self, kind: ResourceKind) -> u32 {
        self.rng.gen_range(kind.percent_range())
    }

    pub fn sample(&mut self) -> f64 {
        f64::from(self.rng.gen_range(SAMPLE_RANGE))
    }

    pub fn activity(&mut self) -> &'static ActivityTemplate {
        &ACTIVITY_CATALOG[self.rng.gen_range(0..ACTIVITY_CATALOG.len())]
    }

    pub fn tile(&mut self, kind: MetricKind) -> MetricTile {
        let value = self.metric(kind);
        let change = self.change(kind);
        MetricTile::new(kind, value, change)
    }

    pub fn gauge(&mut self, kind: ResourceKind) -> ResourceGauge {
        ResourceGauge::new(kind, self.resource(kind))
    }
}

/// Format an integer with comma thousands separators ("12345" -> "12,345")
pub fn group_thousands(value: u32) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
