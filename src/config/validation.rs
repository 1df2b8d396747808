//! Config validation: unknown-key detection with Levenshtein suggestions.
//!
//! The raw TOML is first parsed into a `toml::Value`, its key tree walked and
//! compared against the known option names. Unknown keys produce warnings with
//! a "did you mean?" suggestion; they never fail the load.

use std::collections::HashSet;
use std::fmt;

/// A non-fatal config warning.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref s) = self.suggestion {
            write!(f, ", did you mean '{s}'?")?;
        }
        Ok(())
    }
}

// ============================================================================
// Known Config Keys
// ============================================================================

/// Every valid dotted key path of `RenderConfig`.
///
/// Kept by hand in step with `render_config.rs`.
pub fn known_config_keys() -> HashSet<&'static str> {
    let keys: &[&str] = &[
        // [well_log]
        "well_log",
        "well_log.description",
        "well_log.hatch",
        "well_log.legend",
        "well_log.title",
        "well_log.save",
        "well_log.figure_size",
        "well_log.figure_size.width_in",
        "well_log.figure_size.height_in",
        "well_log.dpi",
        "well_log.column_width",
        "well_log.ticks",
        "well_log.ticks.major",
        "well_log.ticks.minor",
        // [section]
        "section",
        "section.bar_width",
        "section.grid",
        "section.save",
        "section.title",
        "section.north",
        "section.elevation",
        "section.label_height",
        "section.figure_size",
        "section.figure_size.width_in",
        "section.figure_size.height_in",
        "section.dpi",
        "section.ticks",
        "section.ticks.major",
        "section.ticks.minor",
    ];
    keys.iter().copied().collect()
}

// ============================================================================
// TOML Key Walking
// ============================================================================

/// Dotted paths of every key in a TOML document, parents before children.
///
/// `{ a = { b = 1, c = 2 } }` yields `["a", "a.b", "a.c"]`.
pub fn key_paths(value: &toml::Value) -> Vec<String> {
    let mut paths = Vec::new();
    if let Some(table) = value.as_table() {
        push_key_paths(table, None, &mut paths);
    }
    paths
}

fn push_key_paths(table: &toml::Table, parent: Option<&str>, out: &mut Vec<String>) {
    for (key, child) in table {
        let path = match parent {
            Some(p) => format!("{p}.{key}"),
            None => key.clone(),
        };
        out.push(path.clone());
        if let Some(nested) = child.as_table() {
            push_key_paths(nested, Some(&path), out);
        }
    }
}

// ============================================================================
// Levenshtein Distance
// ============================================================================

fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Closest known key within edit distance 3, ties broken alphabetically.
pub fn suggest_correction(unknown: &str, known: &HashSet<&str>) -> Option<String> {
    known
        .iter()
        .map(|&k| (levenshtein(unknown, k), k))
        .filter(|(dist, _)| *dist <= 3)
        .min()
        .map(|(_, k)| k.to_string())
}

// ============================================================================
// Unknown Key Validation (entry point)
// ============================================================================

/// Warnings for every unknown key in a raw TOML document.
///
/// Parse errors yield no warnings; serde reports them on the real parse.
pub fn validate_unknown_keys(raw_toml: &str) -> Vec<ValidationWarning> {
    let Ok(value) = raw_toml.parse::<toml::Value>() else {
        return Vec::new();
    };

    let known = known_config_keys();
    key_paths(&value)
        .into_iter()
        .filter(|key| !known.contains(key.as_str()))
        .map(|key| ValidationWarning {
            suggestion: suggest_correction(&key, &known),
            message: format!("Unknown config key '{key}'"),
            field: key,
        })
        .collect()
}
