//! Rendering options for well logs and cross-sections
//!
//! Each struct implements `Default` with the values in `config::defaults`, so
//! a partial TOML document only needs to name the options it changes.

use super::defaults;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

// ============================================================================
// Errors
// ============================================================================

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Config validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),
}

// ============================================================================
// Top-Level Config
// ============================================================================

/// All rendering options, grouped by figure type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    #[serde(default)]
    pub well_log: WellPlotOptions,

    #[serde(default)]
    pub section: SectionOptions,
}

impl RenderConfig {
    /// Parse and validate a TOML document.
    ///
    /// Unknown keys are logged as warnings with a suggested correction and
    /// otherwise ignored.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        for w in super::validation::validate_unknown_keys(contents) {
            warn!("{}", w);
        }

        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        debug!("Render config loaded");
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Check every option, collecting all problems into one error.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = self.well_log.problems();
        errors.extend(self.section.problems());
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

// ============================================================================
// Figure geometry
// ============================================================================

/// Physical figure size in inches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FigureSize {
    pub width_in: f64,
    pub height_in: f64,
}

impl FigureSize {
    pub const fn new(width_in: f64, height_in: f64) -> Self {
        Self {
            width_in,
            height_in,
        }
    }
}

/// Tick spacing on the depth/elevation axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TickSpacing {
    #[serde(default = "default_major_tick")]
    pub major: f64,
    #[serde(default = "default_minor_tick")]
    pub minor: f64,
}

fn default_major_tick() -> f64 {
    defaults::MAJOR_TICK_STEP
}
fn default_minor_tick() -> f64 {
    defaults::MINOR_TICK_STEP
}

impl Default for TickSpacing {
    fn default() -> Self {
        Self {
            major: default_major_tick(),
            minor: default_minor_tick(),
        }
    }
}

// ============================================================================
// Single-well log
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WellPlotOptions {
    /// Print each interval's description beside the column
    pub description: bool,
    /// Has no effect; patches always carry their table hatch
    pub hatch: bool,
    pub legend: bool,
    /// Figure title; replaced by the well name when `save` is set
    pub title: Option<String>,
    /// Write the figure to disk, named after the well
    pub save: bool,
    pub figure_size: FigureSize,
    pub dpi: f64,
    pub column_width: f64,
    pub ticks: TickSpacing,
}

impl Default for WellPlotOptions {
    fn default() -> Self {
        Self {
            description: true,
            hatch: true,
            legend: false,
            title: None,
            save: false,
            figure_size: FigureSize::new(
                defaults::LOG_FIGURE_WIDTH_IN,
                defaults::LOG_FIGURE_HEIGHT_IN,
            ),
            dpi: defaults::LOG_DPI,
            column_width: defaults::LOG_COLUMN_WIDTH,
            ticks: TickSpacing::default(),
        }
    }
}

impl WellPlotOptions {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let errors = self.problems();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    fn problems(&self) -> Vec<String> {
        let mut errors = Vec::new();
        check_figure("well_log", self.figure_size, self.dpi, &mut errors);
        check_positive("well_log.column_width", self.column_width, &mut errors);
        check_ticks("well_log.ticks", self.ticks, &mut errors);
        errors
    }
}

// ============================================================================
// Cross-section
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionOptions {
    /// Horizontal width of each well's bar
    pub bar_width: f64,
    /// Dashed gridlines at major elevation ticks
    pub grid: bool,
    /// Write the figure to disk, named after the title
    pub save: bool,
    pub title: String,
    /// Label the x axis "Northing" instead of "Easting"
    pub north: bool,
    /// Label the y axis "Elevation" instead of "Depth"
    pub elevation: bool,
    /// Height of well name labels above each well's surface elevation
    pub label_height: f64,
    pub figure_size: FigureSize,
    pub dpi: f64,
    pub ticks: TickSpacing,
}

impl Default for SectionOptions {
    fn default() -> Self {
        Self {
            bar_width: defaults::SECTION_BAR_WIDTH,
            grid: true,
            save: false,
            title: defaults::SECTION_TITLE.to_string(),
            north: false,
            elevation: true,
            label_height: defaults::WELL_LABEL_HEIGHT,
            figure_size: FigureSize::new(
                defaults::SECTION_FIGURE_WIDTH_IN,
                defaults::SECTION_FIGURE_HEIGHT_IN,
            ),
            dpi: defaults::SECTION_DPI,
            ticks: TickSpacing::default(),
        }
    }
}

impl SectionOptions {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let errors = self.problems();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    fn problems(&self) -> Vec<String> {
        let mut errors = Vec::new();
        check_figure("section", self.figure_size, self.dpi, &mut errors);
        check_positive("section.bar_width", self.bar_width, &mut errors);
        check_ticks("section.ticks", self.ticks, &mut errors);
        if !self.label_height.is_finite() {
            errors.push(format!(
                "section.label_height: must be finite (got {})",
                self.label_height
            ));
        }
        errors
    }
}

// ============================================================================
// Range checks
// ============================================================================

fn check_positive(name: &str, value: f64, errors: &mut Vec<String>) {
    if !value.is_finite() || value <= 0.0 {
        errors.push(format!("{name}: must be finite and > 0 (got {value})"));
    }
}

fn check_figure(section: &str, size: FigureSize, dpi: f64, errors: &mut Vec<String>) {
    let before = errors.len();
    check_positive(&format!("{section}.figure_size.width_in"), size.width_in, errors);
    check_positive(&format!("{section}.figure_size.height_in"), size.height_in, errors);
    check_positive(&format!("{section}.dpi"), dpi, errors);
    if errors.len() > before {
        return;
    }

    let pixels = (size.width_in * dpi).round() * (size.height_in * dpi).round();
    if pixels > defaults::MAX_FIGURE_PIXELS as f64 {
        errors.push(format!(
            "{section}: {}x{} in at {dpi} dpi is {pixels:.0} px, more than {} px",
            size.width_in,
            size.height_in,
            defaults::MAX_FIGURE_PIXELS
        ));
    }
}

fn check_ticks(name: &str, ticks: TickSpacing, errors: &mut Vec<String>) {
    check_positive(&format!("{name}.major"), ticks.major, errors);
    check_positive(&format!("{name}.minor"), ticks.minor, errors);
    if ticks.minor > ticks.major {
        errors.push(format!(
            "{name}: minor step ({}) must not exceed major step ({})",
            ticks.minor, ticks.major
        ));
    }
}
