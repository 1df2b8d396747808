//! Shared data structures for borehole logs
//!
//! - `WellInfo`: identity and location metadata
//! - `Interval`: one stratigraphic layer, with its stable `IntervalId`

mod interval;
mod well_info;

pub use interval::*;
pub use well_info::*;
