// Chart renderer - draws the rolling series onto an abstract drawing surface
use crate::domain::dashboard::Theme;

pub const GRID_BANDS: usize = 5;
pub const LINE_COLOR: &str = "#3b82f6";
pub const LINE_WIDTH: f64 = 3.0;
pub const GRID_LINE_WIDTH: f64 = 1.0;
pub const MARKER_RADIUS: f64 = 4.0;
pub const AREA_TOP_COLOR: &str = "rgba(59, 130, 246, 0.3)";
pub const AREA_BOTTOM_COLOR: &str = "rgba(59, 130, 246, 0.05)";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Fill {
    Solid(String),
    /// Top-to-bottom gradient spanning the whole surface height
    VerticalGradient { top: String, bottom: String },
}

/// Two-dimensional drawing target supplied by the display side
pub trait Surface {
    fn width(&self) -> f64;
    fn height(&self) -> f64;
    fn clear(&mut self);
    fn stroke_line(&mut self, from: Point, to: Point, color: &str, width: f64);
    fn fill_polygon(&mut self, points: &[Point], fill: &Fill);
    fn stroke_polyline(&mut self, points: &[Point], color: &str, width: f64);
    fn fill_circle(&mut self, center: Point, radius: f64, color: &str);
}

#[derive(Debug, Clone, Copy)]
pub struct ChartRenderer {
    capacity: usize,
}

impl ChartRenderer {
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Clear the surface and redraw grid, area, line and markers for `samples`
    pub fn render<S: Surface + ?Sized>(&self, samples: &[f64], theme: Theme, surface: &mut S) {
        let width = surface.width();
        let height = surface.height();

        surface.clear();

        for i in 0..=GRID_BANDS {
            let y = height / GRID_BANDS as f64 * i as f64;
            surface.stroke_line(
                Point::new(0.0, y),
                Point::new(width, y),
                theme.grid_color(),
                GRID_LINE_WIDTH,
            );
        }

        let points = plot_points(samples, self.capacity, width, height);
        if points.len() < 2 {
            return;
        }

        let mut area = Vec::with_capacity(points.len() + 2);
        area.push(Point::new(points[0].x, height));
        area.extend_from_slice(&points);
        area.push(Point::new(points[points.len() - 1].x, height));
        surface.fill_polygon(
            &area,
            &Fill::VerticalGradient {
                top: AREA_TOP_COLOR.to_string(),
                bottom: AREA_BOTTOM_COLOR.to_string(),
            },
        );

        surface.stroke_polyline(&points, LINE_COLOR, LINE_WIDTH);

        for point in &points {
            surface.fill_circle(*point, MARKER_RADIUS, LINE_COLOR);
        }
    }
}

/// Map samples to surface coordinates.
///
/// x advances by `width / (capacity - 1)` per sample so a full buffer spans the
/// whole width; y is normalized to the min/max of `samples`, larger values higher.
/// Returns no points for fewer than two samples.
pub fn plot_points(samples: &[f64], capacity: usize, width: f64, height: f64) -> Vec<Point> {
    if samples.len() < 2 {
        return Vec::new();
    }

    let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
    let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = if max - min == 0.0 { 1.0 } else { max - min };
    let step_x = if capacity > 1 {
        width / (capacity - 1) as f64
    } else {
        0.0
    };

    samples
        .iter()
        .enumerate()
        .map(|(i, value)| Point::new(i as f64 * step_x, height - ((value - min) / range) * height))
        .collect()
}
