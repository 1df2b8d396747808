//! Backend-free figure description
//!
//! A `Figure` is everything a renderer computes: filled patches in data
//! coordinates, text labels, axis limits and ticks, and the legend. Backends
//! in `raster` and `svg` only map it onto a surface.

use crate::config::{defaults, FigureSize, TickSpacing};
use crate::style::{Color, Hatch};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A filled quadrilateral with its lithology style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patch {
    /// Upper left, lower left, lower right, upper right
    pub corners: [Point; 4],
    pub color: Color,
    pub hatch: Hatch,
    pub alpha: f64,
    /// Lithology name, used for legend grouping
    pub label: String,
}

impl Patch {
    /// Axis-aligned column from `x0` to `x0 + width`, spanning `y_top..y_bottom`.
    pub fn column(x0: f64, width: f64, y_top: f64, y_bottom: f64) -> [Point; 4] {
        [
            Point::new(x0, y_top),
            Point::new(x0, y_bottom),
            Point::new(x0 + width, y_bottom),
            Point::new(x0 + width, y_top),
        ]
    }

    /// `(x_min, x_max, y_min, y_max)`
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        self.corners.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY, f64::INFINITY, f64::NEG_INFINITY),
            |(x0, x1, y0, y1), p| (x0.min(p.x), x1.max(p.x), y0.min(p.y), y1.max(p.y)),
        )
    }

    /// `(y_min, y_max)`
    pub fn vertical_span(&self) -> (f64, f64) {
        let (_, _, y0, y1) = self.bounds();
        (y0, y1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VAlign {
    Top,
    Center,
    Baseline,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextLabel {
    pub anchor: Point,
    pub text: String,
    pub font_pt: f64,
    /// Counter-clockwise rotation in degrees
    pub rotation_deg: f64,
    pub h_align: HAlign,
    pub v_align: VAlign,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TickMode {
    Hidden,
    /// Ticks at every multiple of the given steps
    Fixed(TickSpacing),
    /// Major ticks at a round step picked from the axis span
    Auto,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    pub label: Option<String>,
    /// Lower data limit
    pub min: f64,
    /// Upper data limit
    pub max: f64,
    /// Values increase toward the bottom (or left)
    pub inverted: bool,
    pub ticks: TickMode,
    /// Draw the axis line
    pub spine: bool,
}

impl Axis {
    /// Axis over `[a, b]` in either order. A zero-width range is widened so
    /// the axis always has a positive span.
    pub fn new(a: f64, b: f64) -> Self {
        let (mut min, mut max) = if a <= b { (a, b) } else { (b, a) };
        if !(max - min).is_normal() {
            min -= 0.5;
            max += 0.5;
        }
        Self {
            label: None,
            min,
            max,
            inverted: false,
            ticks: TickMode::Auto,
            spine: true,
        }
    }

    /// Axis over the data range `[lo, hi]` padded by the default margin.
    pub fn autoscaled(lo: f64, hi: f64) -> Self {
        let span = (hi - lo).abs();
        let pad = if span > 0.0 {
            span * defaults::AXIS_MARGIN_FRACTION
        } else {
            0.5
        };
        Self::new(lo.min(hi) - pad, lo.max(hi) + pad)
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_ticks(mut self, ticks: TickMode) -> Self {
        self.ticks = ticks;
        self
    }

    pub fn inverted(mut self) -> Self {
        self.inverted = true;
        self
    }

    pub fn without_spine(mut self) -> Self {
        self.spine = false;
        self
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Position of `value` along the axis as a fraction, 0 at the start of
    /// the drawn axis (bottom or left) and 1 at its end.
    pub fn fraction(&self, value: f64) -> f64 {
        let f = (value - self.min) / self.span();
        if self.inverted {
            1.0 - f
        } else {
            f
        }
    }

    pub fn major_ticks(&self) -> Vec<f64> {
        match self.ticks {
            TickMode::Hidden => Vec::new(),
            TickMode::Fixed(spacing) => multiples_within(spacing.major, self.min, self.max),
            TickMode::Auto => multiples_within(nice_step(self.span()), self.min, self.max),
        }
    }

    /// Minor ticks that do not coincide with a major tick.
    pub fn minor_ticks(&self) -> Vec<f64> {
        let TickMode::Fixed(spacing) = self.ticks else {
            return Vec::new();
        };
        let majors = self.major_ticks();
        let tolerance = spacing.minor * 1e-6;
        multiples_within(spacing.minor, self.min, self.max)
            .into_iter()
            .filter(|m| !majors.iter().any(|t| (t - m).abs() < tolerance))
            .collect()
    }
}

/// Integer tick label, truncating toward zero.
pub fn tick_label(value: f64) -> String {
    // Guard against 2.9999999 from accumulated float error
    let snapped = if (value - value.round()).abs() < 1e-9 {
        value.round()
    } else {
        value
    };
    format!("{}", snapped.trunc() as i64)
}

fn multiples_within(step: f64, min: f64, max: f64) -> Vec<f64> {
    if !(step.is_finite() && step > 0.0 && min.is_finite() && max.is_finite()) {
        return Vec::new();
    }
    let tolerance = step * 1e-9;
    let first = ((min - tolerance) / step).ceil() as i64;
    let last = ((max + tolerance) / step).floor() as i64;
    (first..=last).map(|k| k as f64 * step).collect()
}

/// A round step (1, 2, 2.5 or 5 times a power of ten) giving at most nine
/// ticks across `span`.
fn nice_step(span: f64) -> f64 {
    if !(span.is_finite() && span > 0.0) {
        return 1.0;
    }
    let raw = span / 8.0;
    let magnitude = 10f64.powf(raw.log10().floor());
    [1.0, 2.0, 2.5, 5.0, 10.0]
        .iter()
        .map(|m| m * magnitude)
        .find(|step| span / step <= 8.0)
        .unwrap_or(10.0 * magnitude)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub label: String,
    pub color: Color,
    pub hatch: Hatch,
    pub alpha: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Legend {
    pub entries: Vec<LegendEntry>,
    pub font_pt: f64,
}

impl Legend {
    pub fn labels(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.label.as_str()).collect()
    }
}

/// A fully laid-out figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    pub title: Option<String>,
    pub size: FigureSize,
    pub dpi: f64,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub patches: Vec<Patch>,
    pub texts: Vec<TextLabel>,
    pub legend: Option<Legend>,
    /// Dashed gridlines at the y-axis major ticks
    pub grid: bool,
    /// The caller asked for this figure to be written to disk
    pub save: bool,
}

impl Figure {
    /// File name stem: the title with spaces replaced by underscores.
    pub fn file_stem(&self) -> String {
        match self.title.as_deref() {
            Some(title) if !title.trim().is_empty() => title.replace(' ', "_"),
            _ => "figure".to_string(),
        }
    }

    /// Raster dimensions in pixels.
    pub fn pixel_size(&self) -> (u32, u32) {
        let px = |inches: f64| (inches * self.dpi).round().max(1.0) as u32;
        (px(self.size.width_in), px(self.size.height_in))
    }
}
