// SVG drawing surface - turns chart draw calls into a standalone SVG document
use crate::application::chart_renderer::{Fill, Point, Surface};
use std::fmt::Write;

#[derive(Debug, Clone)]
pub struct SvgSurface {
    width: f64,
    height: f64,
    defs: Vec<String>,
    elements: Vec<String>,
}

impl SvgSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            defs: Vec::new(),
            elements: Vec::new(),
        }
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    pub fn to_document(&self) -> String {
        let mut doc = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = fmt_num(self.width),
            h = fmt_num(self.height),
        );
        if !self.defs.is_empty() {
            doc.push_str("<defs>");
            for def in &self.defs {
                doc.push_str(def);
            }
            doc.push_str("</defs>");
        }
        for element in &self.elements {
            doc.push_str(element);
        }
        doc.push_str("</svg>");
        doc
    }

    fn paint(&mut self, fill: &Fill) -> String {
        match fill {
            Fill::Solid(color) => color.clone(),
            Fill::VerticalGradient { top, bottom } => {
                let id = format!("area-gradient-{}", self.defs.len());
                self.defs.push(format!(
                    r#"<linearGradient id="{id}" x1="0" y1="0" x2="0" y2="{h}" gradientUnits="userSpaceOnUse"><stop offset="0%" stop-color="{top}"/><stop offset="100%" stop-color="{bottom}"/></linearGradient>"#,
                    h = fmt_num(self.height),
                ));
                format!("url(#{})", id)
            }
        }
    }
}

impl Surface for SvgSurface {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn clear(&mut self) {
        self.defs.clear();
        self.elements.clear();
    }

    fn stroke_line(&mut self, from: Point, to: Point, color: &str, width: f64) {
        self.elements.push(format!(
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}"/>"#,
            fmt_num(from.x),
            fmt_num(from.y),
            fmt_num(to.x),
            fmt_num(to.y),
            color,
            fmt_num(width),
        ));
    }

    fn fill_polygon(&mut self, points: &[Point], fill: &Fill) {
        let paint = self.paint(fill);
        self.elements.push(format!(
            r#"<polygon points="{}" fill="{}"/>"#,
            points_attr(points),
            paint
        ));
    }

    fn stroke_polyline(&mut self, points: &[Point], color: &str, width: f64) {
        self.elements.push(format!(
            r#"<polyline points="{}" fill="none" stroke="{}" stroke-width="{}" stroke-linejoin="round"/>"#,
            points_attr(points),
            color,
            fmt_num(width),
        ));
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: &str) {
        self.elements.push(format!(
            r#"<circle cx="{}" cy="{}" r="{}" fill="{}"/>"#,
            fmt_num(center.x),
            fmt_num(center.y),
            fmt_num(radius),
            color
        ));
    }
}

fn points_attr(points: &[Point]) -> String {
    let mut out = String::new();
    for (i, point) in points.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{},{}", fmt_num(point.x), fmt_num(point.y));
    }
    out
}

/// Two decimals, trailing zeros trimmed ("12.50" -> "12.5", "3.00" -> "3")
fn fmt_num(value: f64) -> String {
    let s = format!("{:.2}", value);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}
