//! Well Mutation Property Tests
//!
//! Randomised insertion and removal sequences against the interval
//! invariants: sorted by top after every mutation, exact duplicates collapsed,
//! lithology removal touching only the named lithology.

use borehole_log::{Well, WellError, WellInfo};
use proptest::prelude::*;

const LITHOLOGIES: &[&str] = &["Clay", "Silt", "Till", "Bedrock", "Fill"];

fn interval_strategy() -> impl Strategy<Value = (f64, f64, usize, String)> {
    (
        0u32..200,
        1u32..20,
        0..LITHOLOGIES.len(),
        prop::sample::select(vec!["", "soft", "dense", "wet"]),
    )
        .prop_map(|(top, thickness, lith, desc)| {
            let top = f64::from(top) * 0.25;
            (top, top + f64::from(thickness) * 0.25, lith, desc.to_string())
        })
}

fn is_sorted(well: &Well) -> bool {
    well.intervals().windows(2).all(|w| w[0].top <= w[1].top)
}

proptest! {
    #[test]
    fn sorted_after_every_add(records in prop::collection::vec(interval_strategy(), 0..40)) {
        let mut well = Well::new(WellInfo::default());
        for (top, bottom, lith, desc) in &records {
            well.add_interval(*top, *bottom, LITHOLOGIES[*lith], desc.as_str());
            prop_assert!(is_sorted(&well));
        }
    }

    #[test]
    fn repeated_records_are_stored_once(records in prop::collection::vec(interval_strategy(), 1..20)) {
        let mut well = Well::new(WellInfo::default());
        for (top, bottom, lith, desc) in &records {
            well.add_interval(*top, *bottom, LITHOLOGIES[*lith], desc.as_str());
        }
        let count = well.len();
        for (top, bottom, lith, desc) in &records {
            well.add_interval(*top, *bottom, LITHOLOGIES[*lith], desc.as_str());
        }
        prop_assert_eq!(well.len(), count);

        for (i, a) in well.intervals().iter().enumerate() {
            for b in &well.intervals()[i + 1..] {
                prop_assert!(!a.same_record(b));
            }
        }
    }

    #[test]
    fn lithology_removal_is_exact(
        records in prop::collection::vec(interval_strategy(), 0..30),
        target in 0..LITHOLOGIES.len(),
    ) {
        let mut well = Well::new(WellInfo::default());
        for (top, bottom, lith, desc) in &records {
            well.add_interval(*top, *bottom, LITHOLOGIES[*lith], desc.as_str());
        }
        let target = LITHOLOGIES[target];
        let survivors: Vec<_> = well
            .intervals()
            .iter()
            .filter(|i| i.lithology != target)
            .map(|i| i.id)
            .collect();
        let expected_removed = well.len() - survivors.len();

        let removed = well.remove_interval(None, Some(target)).unwrap();

        prop_assert_eq!(removed, expected_removed);
        prop_assert!(well.intervals().iter().all(|i| i.lithology != target));
        let remaining: Vec<_> = well.intervals().iter().map(|i| i.id).collect();
        prop_assert_eq!(remaining, survivors);
        prop_assert!(is_sorted(&well));
    }
}

#[test]
fn remove_requires_a_selector() {
    let mut well = Well::new(WellInfo::default());
    assert_eq!(well.remove_interval(None, None), Err(WellError::MissingSelector));
}

#[test]
fn insertion_order_scenario() {
    let mut well = Well::new(WellInfo::default());
    well.add_interval(2.0, 5.0, "Till", "");
    well.add_interval(0.0, 2.0, "Clay", "");

    let got: Vec<(&str, f64, f64)> = well
        .intervals()
        .iter()
        .map(|i| (i.lithology.as_str(), i.top, i.bottom))
        .collect();
    assert_eq!(got, vec![("Clay", 0.0, 2.0), ("Till", 2.0, 5.0)]);
}
