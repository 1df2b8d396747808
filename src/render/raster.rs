//! Raster backend
//!
//! Paints a `Figure` onto a `tiny_skia::Pixmap`: patches with their opacity
//! and hatching, dashed grid, spines and ticks, the legend and every text run.
//! Glyphs come from the `font8x8` bitmap font, stretched to the font size.

use super::figure::{Figure, Point};
use super::layout::{Layout, PlacedText, Rect, GLYPH_ADVANCE};
use super::RenderError;
use crate::config::defaults;
use crate::style::{Color, HatchStrokes};
use font8x8::{UnicodeFonts, BASIC_FONTS, LATIN_FONTS};
use image::RgbaImage;
use tiny_skia::{FillRule, Paint, Path, PathBuilder, Pixmap, Shader, Stroke, StrokeDash, Transform};

const GRID_ALPHA: f64 = 0.75;
const HATCH_LINE_PX: f32 = 1.0;
const HATCH_DOT_RADIUS_PX: f32 = 1.0;

/// Hatch strokes are drawn in a darker shade of the fill.
pub(super) const HATCH_SHADE: f64 = 0.45;

/// Glyphs are 8x8 cells.
const GLYPH_CELLS: f32 = 8.0;

fn paint(color: Color, alpha: f64, anti_alias: bool) -> Paint<'static> {
    let mut c = tiny_skia::Color::from_rgba8(color.r, color.g, color.b, 255);
    c.set_alpha(alpha.clamp(0.0, 1.0) as f32);
    Paint {
        shader: Shader::SolidColor(c),
        anti_alias,
        ..Default::default()
    }
}

fn sk_rect(r: Rect) -> Option<tiny_skia::Rect> {
    tiny_skia::Rect::from_ltrb(r.x0 as f32, r.y0 as f32, r.x1 as f32, r.y1 as f32)
}

fn segment(pb: &mut PathBuilder, a: (f64, f64), b: (f64, f64)) {
    pb.move_to(a.0 as f32, a.1 as f32);
    pb.line_to(b.0 as f32, b.1 as f32);
}

/// Multiples of `step` inside `[lo, hi]`.
fn multiples(lo: f64, hi: f64, step: f64) -> impl Iterator<Item = f64> {
    let first = (lo / step).ceil() as i64;
    let last = (hi / step).floor() as i64;
    (first..=last).map(move |k| k as f64 * step)
}

struct Painter {
    pixmap: Pixmap,
}

impl Painter {
    fn fill(&mut self, r: Rect, color: Color, alpha: f64) {
        if let Some(rect) = sk_rect(r) {
            self.pixmap
                .fill_rect(rect, &paint(color, alpha, false), Transform::identity(), None);
        }
    }

    fn stroke(&mut self, path: Option<Path>, stroke: &Stroke, color: Color, alpha: f64) {
        if let Some(path) = path {
            self.pixmap.stroke_path(
                &path,
                &paint(color, alpha, true),
                stroke,
                Transform::identity(),
                None,
            );
        }
    }

    fn outline(&mut self, r: Rect, color: Color) {
        let path = sk_rect(r).map(PathBuilder::from_rect);
        self.stroke(path, &Stroke::default(), color, 1.0);
    }

    /// Hatch strokes clipped to `r`. Lines sit on a pixel grid shared by the
    /// whole canvas so neighbouring patches line up.
    fn hatch(&mut self, r: Rect, strokes: HatchStrokes, cell: u32, color: Color, alpha: f64) {
        if strokes.is_empty() {
            return;
        }
        let shade = color.darken(HATCH_SHADE);
        let mut lines = PathBuilder::new();

        if strokes.horizontal > 0 {
            for y in multiples(r.y0, r.y1, HatchStrokes::spacing(cell, strokes.horizontal)) {
                segment(&mut lines, (r.x0, y), (r.x1, y));
            }
        }
        if strokes.vertical > 0 {
            for x in multiples(r.x0, r.x1, HatchStrokes::spacing(cell, strokes.vertical)) {
                segment(&mut lines, (x, r.y0), (x, r.y1));
            }
        }
        if strokes.diagonal > 0 {
            // x + y = c
            let step = HatchStrokes::spacing(cell, strokes.diagonal);
            for c in multiples(r.x0 + r.y0, r.x1 + r.y1, step) {
                let (xa, xb) = (r.x0.max(c - r.y1), r.x1.min(c - r.y0));
                if xa < xb {
                    segment(&mut lines, (xa, c - xa), (xb, c - xb));
                }
            }
        }
        if strokes.back_diagonal > 0 {
            // x - y = c
            let step = HatchStrokes::spacing(cell, strokes.back_diagonal);
            for c in multiples(r.x0 - r.y1, r.x1 - r.y0, step) {
                let (xa, xb) = (r.x0.max(c + r.y0), r.x1.min(c + r.y1));
                if xa < xb {
                    segment(&mut lines, (xa, xa - c), (xb, xb - c));
                }
            }
        }
        let stroke = Stroke {
            width: HATCH_LINE_PX,
            ..Default::default()
        };
        self.stroke(lines.finish(), &stroke, shade, alpha);

        if strokes.dots > 0 {
            let step = HatchStrokes::spacing(cell, strokes.dots);
            let half = step / 2.0;
            let mut dots = PathBuilder::new();
            for y in multiples(r.y0 - half, r.y1 - half, step) {
                for x in multiples(r.x0 - half, r.x1 - half, step) {
                    dots.push_circle((x + half) as f32, (y + half) as f32, HATCH_DOT_RADIUS_PX);
                }
            }
            if let Some(path) = dots.finish() {
                self.pixmap.fill_path(
                    &path,
                    &paint(shade, alpha, true),
                    FillRule::Winding,
                    Transform::identity(),
                    None,
                );
            }
        }
    }

    fn text(&mut self, t: &PlacedText) {
        let Some(path) = glyph_path(&t.text) else {
            return;
        };
        let (dx, dy) = t.box_offset();
        let sx = (t.size_px * GLYPH_ADVANCE) as f32 / GLYPH_CELLS;
        let sy = t.size_px as f32 / GLYPH_CELLS;
        let (sin, cos) = t.rotation_deg.to_radians().sin_cos();
        let (sin, cos) = (sin as f32, cos as f32);
        let (dx, dy) = (dx as f32, dy as f32);

        // Glyph cells -> box offset -> counter-clockwise rotation -> anchor
        let transform = Transform::from_row(
            cos * sx,
            -sin * sx,
            sin * sy,
            cos * sy,
            t.x as f32 + cos * dx + sin * dy,
            t.y as f32 - sin * dx + cos * dy,
        );
        self.pixmap.fill_path(
            &path,
            &paint(Color::BLACK, 1.0, true),
            FillRule::Winding,
            transform,
            None,
        );
    }
}

fn glyph(ch: char) -> Option<[u8; 8]> {
    BASIC_FONTS.get(ch).or_else(|| LATIN_FONTS.get(ch))
}

/// Outline of `text` in glyph-cell units, one unit square per lit bit.
/// Characters the font lacks leave a blank cell.
fn glyph_path(text: &str) -> Option<Path> {
    let mut pb = PathBuilder::new();
    for (i, ch) in text.chars().enumerate() {
        let Some(rows) = glyph(ch) else {
            continue;
        };
        let left = i as f32 * GLYPH_CELLS;
        for (row, &bits) in rows.iter().enumerate() {
            // Bit 0 is the leftmost column
            let lit = |col: u32| (bits >> col) & 1 == 1;
            let mut col = 0;
            while col < 8 {
                if !lit(col) {
                    col += 1;
                    continue;
                }
                let start = col;
                while col < 8 && lit(col) {
                    col += 1;
                }
                if let Some(run) = tiny_skia::Rect::from_xywh(
                    left + start as f32,
                    row as f32,
                    (col - start) as f32,
                    1.0,
                ) {
                    pb.push_rect(run);
                }
            }
        }
    }
    pb.finish()
}

/// Rasterize `figure` at its own size and resolution.
///
/// Fails when the canvas would exceed `defaults::MAX_FIGURE_PIXELS`.
pub fn rasterize(figure: &Figure) -> Result<RgbaImage, RenderError> {
    let (w, h) = figure.pixel_size();
    let too_large = || RenderError::CanvasTooLarge {
        width: w,
        height: h,
    };
    if u64::from(w) * u64::from(h) > defaults::MAX_FIGURE_PIXELS {
        return Err(too_large());
    }
    let mut pixmap = Pixmap::new(w, h).ok_or_else(too_large)?;
    pixmap.fill(tiny_skia::Color::WHITE);
    let mut painter = Painter { pixmap };

    let layout = Layout::new(figure);
    let area = layout.area;

    if figure.grid {
        let (dash, gap) = layout.grid_dash();
        let mut grid = PathBuilder::new();
        for tick in figure.y_axis.major_ticks() {
            let y = layout.y_px(figure, tick);
            segment(&mut grid, (area.x0, y), (area.x1, y));
        }
        let stroke = Stroke {
            width: 1.0,
            dash: StrokeDash::new(vec![dash as f32, gap as f32], 0.0),
            ..Default::default()
        };
        painter.stroke(grid.finish(), &stroke, Color::LIGHT_GRAY.darken(0.8), GRID_ALPHA);
    }

    for patch in &figure.patches {
        let (x0, x1, y0, y1) = patch.bounds();
        let rect = Rect::spanning(
            layout.to_px(figure, Point::new(x0, y0)),
            layout.to_px(figure, Point::new(x1, y1)),
        );
        if let Some(clipped) = rect.intersect(&area) {
            painter.fill(clipped, patch.color, patch.alpha);
            painter.hatch(
                clipped,
                patch.hatch.strokes(),
                layout.hatch_cell(),
                patch.color,
                patch.alpha,
            );
        }
    }

    draw_axes(&mut painter, &layout, figure);

    for text in layout.texts(figure) {
        painter.text(&text);
    }

    if let Some(legend) = &figure.legend {
        let ll = layout.legend(legend);
        painter.fill(ll.frame, Color::WHITE, 0.8);
        painter.outline(ll.frame, Color::LIGHT_GRAY);
        for (row, entry) in ll.rows.iter().zip(&legend.entries) {
            painter.fill(row.swatch, entry.color, entry.alpha);
            painter.hatch(
                row.swatch,
                entry.hatch.strokes(),
                layout.hatch_cell(),
                entry.color,
                entry.alpha,
            );
            painter.text(&row.label);
        }
    }

    Ok(to_image(&painter.pixmap, w, h))
}

fn draw_axes(painter: &mut Painter, layout: &Layout, figure: &Figure) {
    let area = layout.area;
    let mut path = PathBuilder::new();

    if figure.y_axis.spine {
        segment(&mut path, (area.x0, area.y0), (area.x0, area.y1));
        for (ticks, len) in [
            (figure.y_axis.major_ticks(), layout.major_tick_len()),
            (figure.y_axis.minor_ticks(), layout.minor_tick_len()),
        ] {
            for t in ticks {
                let y = layout.y_px(figure, t);
                segment(&mut path, (area.x0 - len, y), (area.x0, y));
            }
        }
    }

    if figure.x_axis.spine {
        segment(&mut path, (area.x0, area.y1), (area.x1, area.y1));
        for (ticks, len) in [
            (figure.x_axis.major_ticks(), layout.major_tick_len()),
            (figure.x_axis.minor_ticks(), layout.minor_tick_len()),
        ] {
            for t in ticks {
                let x = layout.x_px(figure, t);
                segment(&mut path, (x, area.y1), (x, area.y1 + len));
            }
        }
    }

    let stroke = Stroke {
        width: layout.spine_width() as f32,
        ..Default::default()
    };
    painter.stroke(path.finish(), &stroke, Color::BLACK, 1.0);
}

/// Copy the pixmap into an `image` buffer. The canvas starts opaque white, so
/// every pixel is opaque and needs no demultiplying.
fn to_image(pixmap: &Pixmap, width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        let i = (y as usize) * (width as usize) + x as usize;
        let c = pixmap.pixels()[i].demultiply();
        image::Rgba([c.red(), c.green(), c.blue(), c.alpha()])
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FigureSize, TickSpacing};
    use crate::render::figure::{Axis, HAlign, Patch, TextLabel, TickMode, VAlign};
    use crate::style::Hatch;
    use image::Rgba;

    fn figure_with(patch: Patch) -> Figure {
        Figure {
            title: None,
            size: FigureSize::new(2.0, 2.0),
            dpi: 50.0,
            x_axis: Axis::new(0.0, 1.0).with_ticks(TickMode::Hidden).without_spine(),
            y_axis: Axis::new(0.0, 1.0)
                .inverted()
                .with_ticks(TickMode::Fixed(TickSpacing::default())),
            patches: vec![patch],
            texts: Vec::new(),
            legend: None,
            grid: false,
            save: false,
        }
    }

    fn patch(color: Color, hatch: &str, alpha: f64) -> Patch {
        Patch {
            corners: Patch::column(0.0, 1.0, 0.0, 1.0),
            color,
            hatch: Hatch::new(hatch),
            alpha,
            label: "Till".to_string(),
        }
    }

    fn near(a: &Rgba<u8>, b: [u8; 4]) -> bool {
        a.0.iter().zip(b).all(|(x, y)| x.abs_diff(y) <= 2)
    }

    #[test]
    fn test_opaque_patch_fills_centre() {
        let img = rasterize(&figure_with(patch(Color::PERU, "", 1.0))).unwrap();
        assert_eq!(img.dimensions(), (100, 100));
        assert_eq!(img.get_pixel(50, 50), &Rgba([205, 133, 63, 255]));
        // Outside the plot area stays white
        assert_eq!(img.get_pixel(99, 0), &Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_alpha_blends_over_white() {
        let img = rasterize(&figure_with(patch(Color::BLACK, "", 0.5))).unwrap();
        assert!(near(img.get_pixel(50, 50), [128, 128, 128, 255]));
    }

    #[test]
    fn test_hatch_marks_some_pixels() {
        let img = rasterize(&figure_with(patch(Color::KHAKI, "---", 1.0))).unwrap();
        let fill = Rgba([240, 230, 140, 255]);
        let column: Vec<_> = (30..70).map(|y| *img.get_pixel(50, y)).collect();
        assert!(column.iter().any(|p| *p == fill));
        assert!(column.iter().any(|p| *p != fill));
    }

    #[test]
    fn test_text_is_painted() {
        let mut fig = figure_with(patch(Color::WHITE, "", 1.0));
        let blank = rasterize(&fig).unwrap();
        fig.texts.push(TextLabel {
            anchor: Point::new(0.5, 0.5),
            text: "Clay".to_string(),
            font_pt: 12.0,
            rotation_deg: 0.0,
            h_align: HAlign::Center,
            v_align: VAlign::Center,
        });
        let labelled = rasterize(&fig).unwrap();
        let inked = |img: &RgbaImage| img.pixels().filter(|p| p.0[0] < 255).count();
        assert!(inked(&labelled) > inked(&blank));
    }

    #[test]
    fn test_glyph_path_skips_blanks() {
        assert!(glyph_path("   ").is_none());
        assert!(glyph_path("A").is_some());
    }

    #[test]
    fn test_oversized_canvas_is_an_error() {
        let mut fig = figure_with(patch(Color::PERU, "", 1.0));
        fig.dpi = 1e9;
        assert!(matches!(
            rasterize(&fig),
            Err(RenderError::CanvasTooLarge { .. })
        ));
    }
}
