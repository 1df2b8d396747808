//! Pixel layout shared by the raster and SVG backends
//!
//! The plot area takes the usual subplot fractions of the canvas; data
//! coordinates map linearly into it, honouring axis inversion. Pixel y grows
//! downward. Text runs are placed here too, so both backends put every label
//! in the same spot.

use super::figure::{tick_label, Figure, HAlign, Legend, Point, VAlign};
use crate::config::defaults;

const AREA_LEFT: f64 = 0.125;
const AREA_RIGHT: f64 = 0.9;
const AREA_BOTTOM: f64 = 0.11;
const AREA_TOP: f64 = 0.88;

const MAJOR_TICK_PT: f64 = 10.0;
const MINOR_TICK_PT: f64 = 5.0;
const SPINE_WIDTH_PT: f64 = 1.5;
const HATCH_CELL_PT: f64 = 6.0;
const GRID_DASH_PT: f64 = 3.7;
const GRID_GAP_PT: f64 = 1.6;

/// Advance of one glyph as a fraction of the font size.
pub(super) const GLYPH_ADVANCE: f64 = 0.6;

/// Baseline position as a fraction of the font size, measured from the top
/// of the glyph box.
const BASELINE_FRACTION: f64 = 0.875;

/// Share of the figure width taken by the plot area.
pub(super) const PLOT_WIDTH_FRACTION: f64 = AREA_RIGHT - AREA_LEFT;

/// Width of `text` in points.
pub(super) fn text_width_pt(text: &str, font_pt: f64) -> f64 {
    text.chars().count() as f64 * font_pt * GLYPH_ADVANCE
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl Rect {
    /// Rectangle through two opposite corners in any order.
    pub fn spanning(a: (f64, f64), b: (f64, f64)) -> Self {
        Self {
            x0: a.0.min(b.0),
            y0: a.1.min(b.1),
            x1: a.0.max(b.0),
            y1: a.1.max(b.1),
        }
    }

    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    pub fn intersect(&self, other: &Self) -> Option<Self> {
        let r = Self {
            x0: self.x0.max(other.x0),
            y0: self.y0.max(other.y0),
            x1: self.x1.min(other.x1),
            y1: self.y1.min(other.y1),
        };
        (r.x0 < r.x1 && r.y0 < r.y1).then_some(r)
    }
}

/// A text run positioned in pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedText {
    pub x: f64,
    pub y: f64,
    pub text: String,
    pub size_px: f64,
    /// Counter-clockwise rotation in degrees about `(x, y)`
    pub rotation_deg: f64,
    pub h_align: HAlign,
    pub v_align: VAlign,
}

impl PlacedText {
    fn new(x: f64, y: f64, text: impl Into<String>, size_px: f64) -> Self {
        Self {
            x,
            y,
            text: text.into(),
            size_px,
            rotation_deg: 0.0,
            h_align: HAlign::Left,
            v_align: VAlign::Baseline,
        }
    }

    fn aligned(mut self, h_align: HAlign, v_align: VAlign) -> Self {
        self.h_align = h_align;
        self.v_align = v_align;
        self
    }

    fn rotated(mut self, degrees: f64) -> Self {
        self.rotation_deg = degrees;
        self
    }

    pub fn width(&self) -> f64 {
        self.text.chars().count() as f64 * self.size_px * GLYPH_ADVANCE
    }

    /// Top-left corner of the unrotated glyph box relative to the anchor.
    pub fn box_offset(&self) -> (f64, f64) {
        let dx = match self.h_align {
            HAlign::Left => 0.0,
            HAlign::Center => -self.width() / 2.0,
            HAlign::Right => -self.width(),
        };
        let dy = match self.v_align {
            VAlign::Top => 0.0,
            VAlign::Center => -self.size_px / 2.0,
            VAlign::Baseline => -self.size_px * BASELINE_FRACTION,
        };
        (dx, dy)
    }
}

#[derive(Debug, Clone)]
pub struct LegendRow {
    pub swatch: Rect,
    pub label: PlacedText,
}

#[derive(Debug, Clone)]
pub struct LegendLayout {
    pub frame: Rect,
    pub rows: Vec<LegendRow>,
}

#[derive(Debug, Clone, Copy)]
pub struct Layout {
    pub width: f64,
    pub height: f64,
    pub area: Rect,
    pub px_per_pt: f64,
}

impl Layout {
    pub fn new(figure: &Figure) -> Self {
        let (w, h) = figure.pixel_size();
        let (width, height) = (f64::from(w), f64::from(h));
        Self {
            width,
            height,
            area: Rect {
                x0: width * AREA_LEFT,
                y0: height * (1.0 - AREA_TOP),
                x1: width * AREA_RIGHT,
                y1: height * (1.0 - AREA_BOTTOM),
            },
            px_per_pt: figure.dpi / 72.0,
        }
    }

    pub fn pt(&self, points: f64) -> f64 {
        points * self.px_per_pt
    }

    pub fn x_px(&self, figure: &Figure, x: f64) -> f64 {
        self.area.x0 + figure.x_axis.fraction(x) * self.area.width()
    }

    pub fn y_px(&self, figure: &Figure, y: f64) -> f64 {
        self.area.y1 - figure.y_axis.fraction(y) * self.area.height()
    }

    pub fn to_px(&self, figure: &Figure, p: Point) -> (f64, f64) {
        (self.x_px(figure, p.x), self.y_px(figure, p.y))
    }

    pub fn major_tick_len(&self) -> f64 {
        self.pt(MAJOR_TICK_PT)
    }

    pub fn minor_tick_len(&self) -> f64 {
        self.pt(MINOR_TICK_PT)
    }

    pub fn spine_width(&self) -> f64 {
        self.pt(SPINE_WIDTH_PT).max(1.0)
    }

    /// `(dash, gap)` lengths of grid lines.
    pub fn grid_dash(&self) -> (f64, f64) {
        (self.pt(GRID_DASH_PT), self.pt(GRID_GAP_PT))
    }

    pub fn hatch_cell(&self) -> u32 {
        self.pt(HATCH_CELL_PT).round().max(3.0) as u32
    }

    pub fn text_width(&self, text: &str, font_pt: f64) -> f64 {
        self.pt(text_width_pt(text, font_pt))
    }

    /// Every text run of `figure` outside the legend: data labels, tick and
    /// axis labels, and the title.
    pub fn texts(&self, figure: &Figure) -> Vec<PlacedText> {
        let area = self.area;
        let tick_px = self.pt(defaults::TICK_LABEL_FONT_PT);
        let label_px = self.pt(defaults::AXIS_LABEL_FONT_PT);

        let mut out: Vec<PlacedText> = figure
            .texts
            .iter()
            .map(|t| {
                let (x, y) = self.to_px(figure, t.anchor);
                PlacedText::new(x, y, t.text.as_str(), self.pt(t.font_pt))
                    .aligned(t.h_align, t.v_align)
                    .rotated(t.rotation_deg)
            })
            .collect();

        let y_axis = &figure.y_axis;
        if y_axis.spine {
            let x = area.x0 - self.major_tick_len() - tick_px * 0.3;
            for t in y_axis.major_ticks() {
                out.push(
                    PlacedText::new(x, self.y_px(figure, t), tick_label(t), tick_px)
                        .aligned(HAlign::Right, VAlign::Center),
                );
            }
        }
        if let Some(label) = &y_axis.label {
            let x = area.x0 - self.major_tick_len() - tick_px * 3.0;
            out.push(
                PlacedText::new(x, (area.y0 + area.y1) / 2.0, label.as_str(), label_px)
                    .aligned(HAlign::Center, VAlign::Baseline)
                    .rotated(90.0),
            );
        }

        let x_axis = &figure.x_axis;
        let below_ticks = area.y1 + self.major_tick_len();
        if x_axis.spine {
            let y = below_ticks + tick_px * 0.3;
            for t in x_axis.major_ticks() {
                out.push(
                    PlacedText::new(self.x_px(figure, t), y, tick_label(t), tick_px)
                        .aligned(HAlign::Center, VAlign::Top),
                );
            }
        }
        if let Some(label) = &x_axis.label {
            out.push(
                PlacedText::new(
                    (area.x0 + area.x1) / 2.0,
                    below_ticks + tick_px * 1.6,
                    label.as_str(),
                    label_px,
                )
                .aligned(HAlign::Center, VAlign::Top),
            );
        }

        if let Some(title) = &figure.title {
            let size = self.pt(defaults::TITLE_FONT_PT);
            let x = (area.x0 + area.x1) / 2.0;
            out.push(
                PlacedText::new(x, area.y0 - size * 0.5, title.as_str(), size)
                    .aligned(HAlign::Center, VAlign::Baseline),
            );
        }

        out
    }

    /// Legend frame anchored at the upper right of the plot area.
    pub fn legend(&self, legend: &Legend) -> LegendLayout {
        let font_px = self.pt(legend.font_pt);
        let pad = font_px * 0.5;
        let row_h = font_px * 1.4;
        let swatch_w = font_px * 2.0;
        let label_w = legend
            .entries
            .iter()
            .map(|e| self.text_width(&e.label, legend.font_pt))
            .fold(0.0, f64::max);

        let frame_w = pad * 3.0 + swatch_w + label_w;
        let frame_h = pad * 2.0 + row_h * legend.entries.len() as f64;
        let x0 = self.area.x1 - frame_w - pad;
        let y0 = self.area.y0 + pad;

        let rows = legend
            .entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let top = y0 + pad + row_h * i as f64;
                LegendRow {
                    swatch: Rect {
                        x0: x0 + pad,
                        y0: top + row_h * 0.15,
                        x1: x0 + pad + swatch_w,
                        y1: top + row_h * 0.85,
                    },
                    label: PlacedText::new(
                        x0 + pad * 2.0 + swatch_w,
                        top + row_h * 0.5,
                        entry.label.as_str(),
                        font_px,
                    )
                    .aligned(HAlign::Left, VAlign::Center),
                }
            })
            .collect();

        LegendLayout {
            frame: Rect {
                x0,
                y0,
                x1: x0 + frame_w,
                y1: y0 + frame_h,
            },
            rows,
        }
    }
}
