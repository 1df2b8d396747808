//! Lithology style table
//!
//! Maps lithology names to the fill color, hatch and opacity used by the
//! renderers. The table is an immutable value handed to each render call;
//! `StyleTable::standard()` builds the reference table.

mod color;
mod hatch;

pub use color::Color;
pub use hatch::{Hatch, HatchStrokes};

use crate::render::RenderError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Visual style of one lithology
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LithologyStyle {
    pub color: Color,
    pub hatch: Hatch,
    /// Opacity in `[0, 1]`
    pub alpha: f64,
}

impl LithologyStyle {
    pub fn new(color: Color, hatch: &str, alpha: f64) -> Self {
        Self {
            color,
            hatch: Hatch::new(hatch),
            alpha,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleTable {
    styles: BTreeMap<String, LithologyStyle>,
}

impl StyleTable {
    /// An empty table; every lookup fails until styles are inserted.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The reference lithology table.
    pub fn standard() -> Self {
        [
            ("Complex Zone", LithologyStyle::new(Color::WHEAT, "..", 0.9)),
            ("Brown Clay", LithologyStyle::new(Color::TAN, "---", 0.7)),
            ("Grey Clay", LithologyStyle::new(Color::DIM_GRAY, "---", 0.8)),
            ("Fill", LithologyStyle::new(Color::BLACK, "..", 0.7)),
            ("Silt", LithologyStyle::new(Color::TAN, "\\\\\\", 0.8)),
            ("Clay Silt", LithologyStyle::new(Color::TAN, "\\,--", 0.8)),
            ("Clay", LithologyStyle::new(Color::DIM_GRAY, "---", 0.8)),
            ("Silt Clay", LithologyStyle::new(Color::ROSY_BROWN, "--,\\", 0.8)),
            ("Till", LithologyStyle::new(Color::PERU, "xx", 0.85)),
            ("Bedrock", LithologyStyle::new(Color::KHAKI, "\\\\", 0.85)),
        ]
        .into_iter()
        .collect()
    }

    /// Builder-style insert, replacing any existing style for `lithology`.
    pub fn with_style(mut self, lithology: impl Into<String>, style: LithologyStyle) -> Self {
        self.styles.insert(lithology.into(), style);
        self
    }

    pub fn get(&self, lithology: &str) -> Option<&LithologyStyle> {
        self.styles.get(lithology)
    }

    /// Style for `lithology`, or `RenderError::UnknownLithology`.
    pub fn lookup(&self, lithology: &str) -> Result<&LithologyStyle, RenderError> {
        self.get(lithology)
            .ok_or_else(|| RenderError::UnknownLithology(lithology.to_string()))
    }

    pub fn contains(&self, lithology: &str) -> bool {
        self.styles.contains_key(lithology)
    }

    pub fn lithologies(&self) -> impl Iterator<Item = &str> {
        self.styles.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, LithologyStyle)> for StyleTable {
    fn from_iter<I: IntoIterator<Item = (K, LithologyStyle)>>(iter: I) -> Self {
        Self {
            styles: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_table_entries() {
        let table = StyleTable::standard();
        assert_eq!(table.len(), 10);

        let till = table.lookup("Till").unwrap();
        assert_eq!(till.color, Color::PERU);
        assert_eq!(till.hatch.pattern(), "xx");
        assert!((till.alpha - 0.85).abs() < f64::EPSILON);

        let silt = table.lookup("Silt").unwrap();
        assert_eq!(silt.hatch.pattern(), "\\\\\\");
    }

    #[test]
    fn test_unknown_lithology_fails_lookup() {
        let table = StyleTable::standard();
        match table.lookup("Granite") {
            Err(RenderError::UnknownLithology(name)) => assert_eq!(name, "Granite"),
            other => panic!("expected UnknownLithology, got {other:?}"),
        }
    }

    #[test]
    fn test_synthetic_table() {
        let table = StyleTable::empty()
            .with_style("Sand", LithologyStyle::new(Color::KHAKI, "..", 0.5));
        assert!(table.contains("Sand"));
        assert!(!table.contains("Clay"));
    }
}
