//! SVG backend
//!
//! The raster backend's figure as vector output: patches with pattern-filled
//! hatching, axes, and text as real `<text>` elements.

use super::figure::{Figure, HAlign, VAlign};
use super::layout::{Layout, PlacedText, Rect};
use super::raster::HATCH_SHADE;
use crate::style::{Color, HatchStrokes};
use std::collections::HashMap;
use std::fmt::Write;

/// Write `figure` as a standalone SVG document.
pub fn to_svg(figure: &Figure) -> String {
    let layout = Layout::new(figure);
    let mut doc = SvgDoc::new(layout.width, layout.height);

    if figure.grid {
        let (dash, gap) = layout.grid_dash();
        for tick in figure.y_axis.major_ticks() {
            let y = layout.y_px(figure, tick);
            doc.push(format!(
                r#"<line x1="{:.2}" y1="{y:.2}" x2="{:.2}" y2="{y:.2}" stroke="{}" stroke-opacity="0.75" stroke-dasharray="{:.1},{:.1}"/>"#,
                layout.area.x0,
                layout.area.x1,
                Color::LIGHT_GRAY.darken(0.8),
                dash,
                gap,
            ));
        }
    }

    for patch in &figure.patches {
        let (x0, x1, y0, y1) = patch.bounds();
        let r = Rect::spanning(
            (layout.x_px(figure, x0), layout.y_px(figure, y0)),
            (layout.x_px(figure, x1), layout.y_px(figure, y1)),
        );
        doc.rect(r, patch.color, patch.alpha);
        doc.hatch(r, patch.hatch.strokes(), patch.color, patch.alpha, layout.hatch_cell());
    }

    axes(&mut doc, &layout, figure);

    for text in layout.texts(figure) {
        doc.text(&text);
    }

    if let Some(legend) = &figure.legend {
        let ll = layout.legend(legend);
        doc.push(format!(
            r##"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="#ffffff" fill-opacity="0.8" stroke="{}"/>"##,
            ll.frame.x0,
            ll.frame.y0,
            ll.frame.width(),
            ll.frame.height(),
            Color::LIGHT_GRAY,
        ));
        for (row, entry) in ll.rows.iter().zip(&legend.entries) {
            doc.rect(row.swatch, entry.color, entry.alpha);
            doc.hatch(row.swatch, entry.hatch.strokes(), entry.color, entry.alpha, layout.hatch_cell());
            doc.text(&row.label);
        }
    }

    doc.finish()
}

fn axes(doc: &mut SvgDoc, layout: &Layout, figure: &Figure) {
    let area = layout.area;
    let spine = layout.spine_width();

    let y_axis = &figure.y_axis;
    if y_axis.spine {
        doc.line((area.x0, area.y0), (area.x0, area.y1), spine);
        for (ticks, len) in [
            (y_axis.major_ticks(), layout.major_tick_len()),
            (y_axis.minor_ticks(), layout.minor_tick_len()),
        ] {
            for t in ticks {
                let y = layout.y_px(figure, t);
                doc.line((area.x0 - len, y), (area.x0, y), spine);
            }
        }
    }

    let x_axis = &figure.x_axis;
    if x_axis.spine {
        doc.line((area.x0, area.y1), (area.x1, area.y1), spine);
        for (ticks, len) in [
            (x_axis.major_ticks(), layout.major_tick_len()),
            (x_axis.minor_ticks(), layout.minor_tick_len()),
        ] {
            for t in ticks {
                let x = layout.x_px(figure, t);
                doc.line((x, area.y1), (x, area.y1 + len), spine);
            }
        }
    }
}

struct SvgDoc {
    body: String,
    defs: String,
    patterns: HashMap<String, String>,
    width: f64,
    height: f64,
}

impl SvgDoc {
    fn new(width: f64, height: f64) -> Self {
        Self {
            body: String::new(),
            defs: String::new(),
            patterns: HashMap::new(),
            width,
            height,
        }
    }

    fn push(&mut self, element: String) {
        self.body.push_str(&element);
        self.body.push('\n');
    }

    fn rect(&mut self, r: Rect, color: Color, alpha: f64) {
        self.push(format!(
            r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{color}" fill-opacity="{alpha}"/>"#,
            r.x0,
            r.y0,
            r.width(),
            r.height(),
        ));
    }

    fn line(&mut self, a: (f64, f64), b: (f64, f64), width: f64) {
        self.push(format!(
            r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="black" stroke-width="{width:.2}"/>"#,
            a.0, a.1, b.0, b.1,
        ));
    }

    /// Overlay `r` with a pattern fill built from `strokes`.
    fn hatch(&mut self, r: Rect, strokes: HatchStrokes, color: Color, alpha: f64, cell: u32) {
        if strokes.is_empty() {
            return;
        }
        let shade = color.darken(HATCH_SHADE);
        let key = format!("{strokes:?}{shade}");
        let next = self.patterns.len();
        let id = self
            .patterns
            .entry(key)
            .or_insert_with(|| format!("hatch{next}"))
            .clone();
        if next < self.patterns.len() {
            self.defs.push_str(&pattern_def(&id, strokes, shade, cell));
        }
        self.push(format!(
            r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="url(#{id})" fill-opacity="{alpha}"/>"#,
            r.x0,
            r.y0,
            r.width(),
            r.height(),
        ));
    }

    fn text(&mut self, label: &PlacedText) {
        let (x, y, size) = (label.x, label.y, label.size_px);
        let anchor = match label.h_align {
            HAlign::Left => "start",
            HAlign::Center => "middle",
            HAlign::Right => "end",
        };
        let baseline = match label.v_align {
            VAlign::Top => "hanging",
            VAlign::Center => "middle",
            VAlign::Baseline => "alphabetic",
        };
        let mut element = format!(
            r#"<text x="{x:.2}" y="{y:.2}" font-size="{size:.1}" text-anchor="{anchor}" dominant-baseline="{baseline}""#
        );
        if label.rotation_deg != 0.0 {
            // Rotation is counter-clockwise, SVG rotates clockwise
            let _ = write!(
                element,
                r#" transform="rotate({:.1} {x:.2} {y:.2})""#,
                -label.rotation_deg
            );
        }
        let _ = write!(element, ">{}</text>", escape(&label.text));
        self.push(element);
    }

    fn finish(self) -> String {
        let mut out = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w:.0}" height="{h:.0}" viewBox="0 0 {w:.0} {h:.0}" font-family="sans-serif">"#,
            w = self.width,
            h = self.height,
        );
        out.push('\n');
        out.push_str(r##"<rect width="100%" height="100%" fill="#ffffff"/>"##);
        out.push('\n');
        if !self.defs.is_empty() {
            out.push_str("<defs>\n");
            out.push_str(&self.defs);
            out.push_str("</defs>\n");
        }
        out.push_str(&self.body);
        out.push_str("</svg>\n");
        out
    }
}

fn pattern_def(id: &str, strokes: HatchStrokes, shade: Color, cell: u32) -> String {
    // One tile holds the densest stroke repeat; lines are drawn per family.
    let c = f64::from(cell);
    let mut lines = String::new();
    let mut family = |density: u32, draw: &dyn Fn(f64) -> String| {
        if density > 0 {
            for k in 0..density {
                lines.push_str(&draw(c * f64::from(k) / f64::from(density)));
            }
        }
    };
    family(strokes.horizontal, &|o| {
        format!(r#"<line x1="0" y1="{o:.2}" x2="{c}" y2="{o:.2}"/>"#)
    });
    family(strokes.vertical, &|o| {
        format!(r#"<line x1="{o:.2}" y1="0" x2="{o:.2}" y2="{c}"/>"#)
    });
    family(strokes.diagonal, &|o| {
        format!(r#"<line x1="{o:.2}" y1="{c}" x2="{:.2}" y2="0"/><line x1="{:.2}" y1="{c}" x2="{o:.2}" y2="0"/>"#, o + c, o - c)
    });
    family(strokes.back_diagonal, &|o| {
        format!(r#"<line x1="{o:.2}" y1="0" x2="{:.2}" y2="{c}"/><line x1="{:.2}" y1="0" x2="{o:.2}" y2="{c}"/>"#, o + c, o - c)
    });
    family(strokes.dots, &|o| {
        format!(r#"<circle cx="{:.2}" cy="{:.2}" r="0.8" fill="{shade}"/>"#, o + c / 2.0, o + c / 2.0)
    });

    format!(
        r#"<pattern id="{id}" width="{c}" height="{c}" patternUnits="userSpaceOnUse"><g stroke="{shade}" stroke-width="1">{lines}</g></pattern>"#
    ) + "\n"
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(escape("A & B <C>"), "A &amp; B &lt;C&gt;");
        assert_eq!(escape("Line A-A'"), "Line A-A&apos;");
    }

    #[test]
    fn test_pattern_def_has_one_line_per_stroke() {
        let strokes = crate::style::Hatch::new("---").strokes();
        let def = pattern_def("hatch0", strokes, Color::BLACK, 12);
        assert_eq!(def.matches("<line").count(), 3);
        assert!(def.starts_with(r#"<pattern id="hatch0""#));
    }
}
