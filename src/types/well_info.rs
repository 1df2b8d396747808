//! Borehole identification metadata

use serde::{Deserialize, Serialize};

/// Identity and location of a borehole.
///
/// Coordinates are in the site reference frame; `elevation` is the ground
/// surface on the vertical datum shared by every well in a section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WellInfo {
    #[serde(default = "default_well_name")]
    pub name: String,

    #[serde(default)]
    pub xcoord: f64,

    #[serde(default)]
    pub ycoord: f64,

    #[serde(default)]
    pub elevation: f64,

    /// Date drilled, free text
    #[serde(default = "default_placeholder")]
    pub date: String,

    #[serde(default = "default_placeholder")]
    pub project: String,

    #[serde(default = "default_logged_by")]
    pub logged_by: String,
}

fn default_well_name() -> String {
    "Borehole".to_string()
}
fn default_placeholder() -> String {
    "---".to_string()
}
fn default_logged_by() -> String {
    "Not Specified".to_string()
}

impl Default for WellInfo {
    fn default() -> Self {
        Self {
            name: default_well_name(),
            xcoord: 0.0,
            ycoord: 0.0,
            elevation: 0.0,
            date: default_placeholder(),
            project: default_placeholder(),
            logged_by: default_logged_by(),
        }
    }
}

impl WellInfo {
    /// Metadata with the given name and every other field defaulted.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn at(mut self, xcoord: f64, ycoord: f64) -> Self {
        self.xcoord = xcoord;
        self.ycoord = ycoord;
        self
    }

    pub fn with_elevation(mut self, elevation: f64) -> Self {
        self.elevation = elevation;
        self
    }
}
