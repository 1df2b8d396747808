//! Well log and cross-section rendering
//!
//! Rendering happens in two steps:
//!
//! 1. **Layout**: `plot_well` and `plot_section` turn wells into a `Figure`
//!    (patches in data coordinates, text, axes, legend). This step needs no
//!    graphics backend and carries all of the geometry.
//! 2. **Emit**: a `Figure` is rasterized (`Figure::render_raster`), written as
//!    PNG (`Figure::save`, `Figure::finish`) or exported as SVG
//!    (`Figure::to_svg`).
//!
//! ```ignore
//! let styles = StyleTable::standard();
//! let figure = plot_section(&wells, &styles, &SectionOptions::default())?;
//! figure.save(Path::new("out"))?; // out/Cross-section.png
//! ```

mod figure;
mod layout;
mod legend;
mod log;
mod raster;
mod section;
mod svg;

pub use figure::{
    tick_label, Axis, Figure, HAlign, Legend, LegendEntry, Patch, Point, TextLabel, TickMode,
    VAlign,
};
pub use legend::legend_from_patches;
pub use log::plot_well;
pub use section::plot_section;

use crate::config::ConfigError;
use image::{ImageFormat, RgbaImage};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Errors from laying out or emitting a figure
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Unknown lithology: {0}")]
    UnknownLithology(String),

    #[error("Well '{0}' has no intervals to plot")]
    EmptyWell(String),

    #[error("Invalid render options: {0}")]
    InvalidOptions(#[from] ConfigError),

    #[error("I/O error writing {}: {}", .0.display(), .1)]
    Io(PathBuf, #[source] io::Error),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Canvas of {width}x{height} px is too large to rasterize")]
    CanvasTooLarge { width: u32, height: u32 },
}

impl Figure {
    pub fn render_raster(&self) -> Result<RgbaImage, RenderError> {
        raster::rasterize(self)
    }

    pub fn to_svg(&self) -> String {
        svg::to_svg(self)
    }

    /// Write the figure as `<dir>/<file_stem>.png` and return the path.
    pub fn save(&self, dir: &Path) -> Result<PathBuf, RenderError> {
        let path = dir.join(format!("{}.png", self.file_stem()));
        let image = self.render_raster()?;
        image.save_with_format(&path, ImageFormat::Png)?;
        info!(
            path = %path.display(),
            width = image.width(),
            height = image.height(),
            dpi = self.dpi,
            "Figure saved"
        );
        Ok(path)
    }

    /// Write the figure as `<dir>/<file_stem>.svg` and return the path.
    pub fn save_svg(&self, dir: &Path) -> Result<PathBuf, RenderError> {
        let path = dir.join(format!("{}.svg", self.file_stem()));
        std::fs::write(&path, self.to_svg()).map_err(|e| RenderError::Io(path.clone(), e))?;
        info!(path = %path.display(), "Figure saved");
        Ok(path)
    }

    /// Save to `dir` if the plot options asked for it.
    pub fn finish(&self, dir: &Path) -> Result<Option<PathBuf>, RenderError> {
        if self.save {
            self.save(dir).map(Some)
        } else {
            Ok(None)
        }
    }
}
