//! Single-well lithology column
//!
//! Depth increases downward. Each interval becomes a fixed-width column
//! segment; the depth axis is locked to the first top and the last bottom.

use super::figure::{Axis, Figure, HAlign, Patch, Point, TextLabel, TickMode, VAlign};
use super::layout::{text_width_pt, PLOT_WIDTH_FRACTION};
use super::legend::legend_from_patches;
use super::RenderError;
use crate::config::{defaults, FigureSize, WellPlotOptions};
use crate::style::StyleTable;
use crate::well::Well;
use tracing::debug;

/// Lay out the lithology log of `well`.
///
/// Fails on the first interval whose lithology is missing from `styles`; no
/// figure is produced in that case. The hatch option is accepted but does not
/// change the output: patches always carry their table hatch.
pub fn plot_well(
    well: &Well,
    styles: &StyleTable,
    opts: &WellPlotOptions,
) -> Result<Figure, RenderError> {
    opts.validate()?;
    let (top, bottom) = well
        .depth_range()
        .ok_or_else(|| RenderError::EmptyWell(well.name().to_string()))?;

    let width = opts.column_width;
    let mut patches = Vec::with_capacity(well.len());
    let mut texts = Vec::new();

    for interval in well.intervals() {
        let style = styles.lookup(&interval.lithology)?;
        patches.push(Patch {
            corners: Patch::column(0.0, width, interval.top, interval.bottom),
            color: style.color,
            hatch: style.hatch.clone(),
            alpha: style.alpha,
            label: interval.lithology.clone(),
        });

        if opts.description {
            texts.push(TextLabel {
                anchor: Point::new(width * defaults::DESCRIPTION_OFFSET_FACTOR, interval.top),
                text: interval.description.clone(),
                font_pt: defaults::DESCRIPTION_FONT_PT,
                rotation_deg: 0.0,
                h_align: HAlign::Left,
                v_align: VAlign::Top,
            });
        }
    }

    let title = if opts.save {
        Some(well.name().to_string())
    } else {
        opts.title.clone()
    };

    let legend = opts
        .legend
        .then(|| legend_from_patches(&patches, defaults::LEGEND_FONT_PT));

    let x_axis = Axis::autoscaled(0.0, width)
        .with_ticks(TickMode::Hidden)
        .without_spine();
    let (x_axis, size) = fit_descriptions(x_axis, opts.figure_size, &texts);

    debug!(
        well = %well.name(),
        intervals = patches.len(),
        top,
        bottom,
        width_in = size.width_in,
        "Well log laid out"
    );

    Ok(Figure {
        title,
        size,
        dpi: opts.dpi,
        x_axis,
        y_axis: Axis::new(top, bottom)
            .inverted()
            .with_ticks(TickMode::Fixed(opts.ticks))
            .with_label("Depth [m]"),
        patches,
        texts,
        legend,
        grid: false,
        save: opts.save,
    })
}

/// Extend the x axis to the right until every description fits, widening the
/// canvas by the same factor so the column keeps its printed width.
fn fit_descriptions(x_axis: Axis, size: FigureSize, texts: &[TextLabel]) -> (Axis, FigureSize) {
    let units_per_inch = x_axis.span() / (size.width_in * PLOT_WIDTH_FRACTION);
    let right = texts
        .iter()
        .filter(|t| !t.text.is_empty())
        .map(|t| t.anchor.x + text_width_pt(&t.text, t.font_pt) / 72.0 * units_per_inch)
        .fold(f64::NEG_INFINITY, f64::max);
    if right <= x_axis.max {
        return (x_axis, size);
    }

    let max = right + x_axis.span() * defaults::AXIS_MARGIN_FRACTION;
    let grow = (max - x_axis.min) / x_axis.span();
    (
        Axis { max, ..x_axis },
        FigureSize::new(size.width_in * grow, size.height_in),
    )
}
