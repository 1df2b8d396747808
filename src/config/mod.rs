//! Rendering configuration
//!
//! Option structs for the single-well log and the cross-section renderers.
//! Every option has a default (see `defaults`), so callers usually start from
//! `Default::default()` and change a few fields:
//!
//! ```ignore
//! let opts = SectionOptions {
//!     title: "Line A-A'".to_string(),
//!     north: true,
//!     ..SectionOptions::default()
//! };
//! ```
//!
//! `RenderConfig::from_toml_str` builds both option sets from a TOML document
//! with `[well_log]` and `[section]` tables.

mod render_config;
pub mod defaults;
pub mod validation;

pub use render_config::*;
