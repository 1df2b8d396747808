//! Hatch patterns
//!
//! Patterns use the familiar single-character vocabulary: `-` horizontal,
//! `|` vertical, `/` and `\` diagonals, `x` both diagonals, `+` both axes,
//! `.` `o` `O` `*` dots. Repeating a character makes that stroke denser.
//! Any other character is ignored.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hatch(String);

impl Hatch {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self(pattern.into())
    }

    pub fn none() -> Self {
        Self(String::new())
    }

    pub fn pattern(&self) -> &str {
        &self.0
    }

    pub fn strokes(&self) -> HatchStrokes {
        let mut s = HatchStrokes::default();
        for c in self.0.chars() {
            match c {
                '-' => s.horizontal += 1,
                '|' => s.vertical += 1,
                '/' => s.diagonal += 1,
                '\\' => s.back_diagonal += 1,
                'x' | 'X' => {
                    s.diagonal += 1;
                    s.back_diagonal += 1;
                }
                '+' => {
                    s.horizontal += 1;
                    s.vertical += 1;
                }
                '.' | 'o' | 'O' | '*' => s.dots += 1,
                _ => {}
            }
        }
        s
    }
}

/// Stroke densities decoded from a hatch pattern; zero means absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HatchStrokes {
    pub horizontal: u32,
    pub vertical: u32,
    pub diagonal: u32,
    pub back_diagonal: u32,
    pub dots: u32,
}

impl HatchStrokes {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Distance in pixels between neighbouring strokes of one family, given
    /// the spacing at density 1. Never closer than three pixels.
    pub fn spacing(cell: u32, density: u32) -> f64 {
        f64::from((cell / density.max(1)).max(3))
    }
}
