//! Multi-well cross-section
//!
//! Each well is drawn as a bar at its real x coordinate. Depths are converted
//! to elevations (`elevation - depth`) so every well hangs from the same
//! vertical datum.

use super::figure::{Axis, Figure, HAlign, Patch, Point, TextLabel, TickMode, VAlign};
use super::legend::legend_from_patches;
use super::RenderError;
use crate::config::{defaults, SectionOptions};
use crate::style::StyleTable;
use crate::well::Well;
use tracing::debug;

/// Lay out a cross-section of `wells`.
///
/// Wells are drawn in the given order. A well without intervals contributes
/// only its name label. Fails on the first interval whose lithology is
/// missing from `styles`.
pub fn plot_section(
    wells: &[Well],
    styles: &StyleTable,
    opts: &SectionOptions,
) -> Result<Figure, RenderError> {
    opts.validate()?;
    let width = opts.bar_width;
    let mut patches = Vec::new();
    let mut texts = Vec::with_capacity(wells.len());

    for well in wells {
        let x = well.info.xcoord;
        for interval in well.intervals() {
            let style = styles.lookup(&interval.lithology)?;
            let (base, top) = interval.elevation_span(well.info.elevation);
            patches.push(Patch {
                corners: Patch::column(x, width, top, base),
                color: style.color,
                hatch: style.hatch.clone(),
                alpha: style.alpha,
                label: interval.lithology.clone(),
            });
        }

        texts.push(TextLabel {
            anchor: Point::new(x + width * 0.5, well.info.elevation + opts.label_height),
            text: well.name().to_string(),
            font_pt: defaults::WELL_NAME_FONT_PT,
            rotation_deg: 90.0,
            h_align: HAlign::Center,
            v_align: VAlign::Baseline,
        });
    }

    let (x_axis, y_axis) = section_axes(&patches, &texts);
    let x_label = if opts.north { "Northing [m]" } else { "Easting [m]" };
    let y_label = if opts.elevation {
        "Elevation [m]"
    } else {
        "Depth [m]"
    };

    debug!(
        wells = wells.len(),
        patches = patches.len(),
        title = %opts.title,
        "Cross-section laid out"
    );

    Ok(Figure {
        title: Some(opts.title.clone()),
        size: opts.figure_size,
        dpi: opts.dpi,
        x_axis: x_axis.with_label(x_label),
        y_axis: y_axis
            .with_ticks(TickMode::Fixed(opts.ticks))
            .with_label(y_label),
        legend: Some(legend_from_patches(&patches, defaults::LEGEND_FONT_PT)),
        patches,
        texts,
        grid: opts.grid,
        save: opts.save,
    })
}

/// Autoscaled axes covering every patch and well label anchor.
fn section_axes(patches: &[Patch], labels: &[TextLabel]) -> (Axis, Axis) {
    let mut xs = (f64::INFINITY, f64::NEG_INFINITY);
    let mut ys = (f64::INFINITY, f64::NEG_INFINITY);
    let mut extend = |x: f64, y: f64| {
        xs = (xs.0.min(x), xs.1.max(x));
        ys = (ys.0.min(y), ys.1.max(y));
    };

    for p in patches {
        let (x0, x1, y0, y1) = p.bounds();
        extend(x0, y0);
        extend(x1, y1);
    }
    for t in labels {
        extend(t.anchor.x, t.anchor.y);
    }

    if xs.0 > xs.1 {
        return (Axis::new(0.0, 1.0), Axis::new(0.0, 1.0));
    }
    (Axis::autoscaled(xs.0, xs.1), Axis::autoscaled(ys.0, ys.1))
}
