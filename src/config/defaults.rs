//! Rendering default constants.
//!
//! Grouped by figure type. Lengths on the data axes are in depth/elevation
//! units (metres in the axis labels); figure sizes are in inches.

// ============================================================================
// Shared axis cosmetics
// ============================================================================

/// Spacing of labelled depth/elevation ticks.
pub const MAJOR_TICK_STEP: f64 = 1.0;

/// Spacing of unlabelled depth/elevation ticks.
pub const MINOR_TICK_STEP: f64 = 0.25;

/// Fraction of the data span added on each side of an autoscaled axis.
pub const AXIS_MARGIN_FRACTION: f64 = 0.05;

/// Largest raster canvas, in pixels (width x height).
pub const MAX_FIGURE_PIXELS: u64 = 100_000_000;

// ============================================================================
// Single-well log
// ============================================================================

pub const LOG_FIGURE_WIDTH_IN: f64 = 2.0;
pub const LOG_FIGURE_HEIGHT_IN: f64 = 12.0;

/// Raster resolution of a saved well log.
pub const LOG_DPI: f64 = 175.0;

/// Width of the lithology column in x-axis units.
pub const LOG_COLUMN_WIDTH: f64 = 1.0;

/// Description text is placed at `column width * factor`.
pub const DESCRIPTION_OFFSET_FACTOR: f64 = 1.1;

// ============================================================================
// Cross-section
// ============================================================================

pub const SECTION_FIGURE_WIDTH_IN: f64 = 15.0;
pub const SECTION_FIGURE_HEIGHT_IN: f64 = 12.0;

/// Raster resolution of a saved cross-section.
pub const SECTION_DPI: f64 = 300.0;

/// Horizontal width of each well's bar in easting/northing units.
pub const SECTION_BAR_WIDTH: f64 = 5.0;

/// Height of the well name anchor above the well's surface elevation.
pub const WELL_LABEL_HEIGHT: f64 = 1.5;

pub const SECTION_TITLE: &str = "Cross-section";

// ============================================================================
// Text
// ============================================================================

pub const TICK_LABEL_FONT_PT: f64 = 12.0;
pub const AXIS_LABEL_FONT_PT: f64 = 15.0;
pub const DESCRIPTION_FONT_PT: f64 = 12.0;
pub const WELL_NAME_FONT_PT: f64 = 15.0;
pub const LEGEND_FONT_PT: f64 = 15.0;
pub const TITLE_FONT_PT: f64 = 15.0;
