//! Legend construction: one entry per patch label, first occurrence wins

use super::figure::{Legend, LegendEntry, Patch};
use std::collections::HashSet;

pub fn legend_from_patches(patches: &[Patch], font_pt: f64) -> Legend {
    let mut seen = HashSet::new();
    let entries = patches
        .iter()
        .filter(|p| seen.insert(p.label.as_str()))
        .map(|p| LegendEntry {
            label: p.label.clone(),
            color: p.color,
            hatch: p.hatch.clone(),
            alpha: p.alpha,
        })
        .collect();
    Legend { entries, font_pt }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{Color, Hatch};

    fn patch(label: &str) -> Patch {
        Patch {
            corners: Patch::column(0.0, 1.0, 0.0, 1.0),
            color: Color::TAN,
            hatch: Hatch::none(),
            alpha: 1.0,
            label: label.to_string(),
        }
    }

    #[test]
    fn test_first_seen_order() {
        let patches: Vec<Patch> = ["A", "B", "A", "C"].into_iter().map(patch).collect();
        let legend = legend_from_patches(&patches, 15.0);
        assert_eq!(legend.labels(), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_empty() {
        assert!(legend_from_patches(&[], 15.0).entries.is_empty());
    }
}
