//! borehole-log: Borehole lithology logs and geological cross-sections
//!
//! ## Architecture
//!
//! - **Well**: identity metadata plus stratigraphic intervals kept sorted by depth
//! - **Style table**: immutable lithology → color/hatch/opacity mapping
//! - **Render**: single-well log and multi-well cross-section layout, with
//!   raster (PNG) and SVG output
//! - **Config**: rendering options with defaults and validation
//!
//! ```ignore
//! use borehole_log::{plot_section, SectionOptions, StyleTable, Well, WellInfo};
//!
//! let mut bh1 = Well::new(WellInfo::named("BH-1").at(0.0, 0.0).with_elevation(100.0));
//! bh1.add_interval(0.0, 2.0, "Clay", "brown, soft");
//! bh1.add_interval(2.0, 6.5, "Till", "dense");
//!
//! let figure = plot_section(&[bh1], &StyleTable::standard(), &SectionOptions::default())?;
//! ```

pub mod config;
pub mod render;
pub mod style;
pub mod types;
pub mod well;

pub use config::{ConfigError, RenderConfig, SectionOptions, WellPlotOptions};
pub use render::{plot_section, plot_well, Figure, RenderError};
pub use style::{Color, Hatch, LithologyStyle, StyleTable};
pub use types::{Interval, IntervalId, Overlap, WellInfo};
pub use well::{Well, WellError};
