//! Stratigraphic interval types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identity of an interval within its well.
///
/// Assigned once at insertion and never reused by the same well, so it stays
/// valid while the ordinal position of the interval shifts under re-sorting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IntervalId(pub(crate) u64);

impl IntervalId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for IntervalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single stratigraphic layer in a borehole
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub id: IntervalId,
    /// Key into the lithology style table
    pub lithology: String,
    /// Depth of the top of the layer below ground surface
    pub top: f64,
    /// Depth of the base of the layer below ground surface
    pub bottom: f64,
    #[serde(default)]
    pub description: String,
}

impl Interval {
    /// Layer thickness; negative when the record is inverted.
    pub fn thickness(&self) -> f64 {
        self.bottom - self.top
    }

    /// Whether `depth` falls inside `[top, bottom)`.
    pub fn contains_depth(&self, depth: f64) -> bool {
        depth >= self.top && depth < self.bottom
    }

    /// Record equality ignoring identity: same lithology, depths and description.
    /// `0.0` and `-0.0` are the same depth, and a NaN depth matches NaN.
    pub fn same_record(&self, other: &Self) -> bool {
        let same_depth = |a: f64, b: f64| a == b || (a.is_nan() && b.is_nan());
        self.lithology == other.lithology
            && same_depth(self.top, other.top)
            && same_depth(self.bottom, other.bottom)
            && self.description == other.description
    }

    /// Elevation span `(base, top)` of this interval relative to a surface datum.
    pub fn elevation_span(&self, datum: f64) -> (f64, f64) {
        (datum - self.bottom, datum - self.top)
    }
}

/// A pair of neighbouring intervals whose depth ranges overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overlap {
    pub upper: IntervalId,
    pub lower: IntervalId,
}
