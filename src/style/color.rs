//! RGB colors and the named colors used by the lithology table

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHEAT: Self = Self::rgb(245, 222, 179);
    pub const TAN: Self = Self::rgb(210, 180, 140);
    pub const DIM_GRAY: Self = Self::rgb(105, 105, 105);
    pub const ROSY_BROWN: Self = Self::rgb(188, 143, 143);
    pub const PERU: Self = Self::rgb(205, 133, 63);
    pub const KHAKI: Self = Self::rgb(240, 230, 140);
    pub const LIGHT_GRAY: Self = Self::rgb(211, 211, 211);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Look up a CSS color name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        let c = match name.to_ascii_lowercase().as_str() {
            "white" => Self::WHITE,
            "black" => Self::BLACK,
            "wheat" => Self::WHEAT,
            "tan" => Self::TAN,
            "dimgray" | "dimgrey" => Self::DIM_GRAY,
            "rosybrown" => Self::ROSY_BROWN,
            "peru" => Self::PERU,
            "khaki" => Self::KHAKI,
            "lightgray" | "lightgrey" => Self::LIGHT_GRAY,
            "gray" | "grey" => Self::rgb(128, 128, 128),
            "brown" => Self::rgb(165, 42, 42),
            "sienna" => Self::rgb(160, 82, 45),
            "sandybrown" => Self::rgb(244, 164, 96),
            "darkkhaki" => Self::rgb(189, 183, 107),
            "olive" => Self::rgb(128, 128, 0),
            "steelblue" => Self::rgb(70, 130, 180),
            _ => return None,
        };
        Some(c)
    }

    /// Scale each channel toward black by `factor` (0 = black, 1 = unchanged).
    pub fn darken(self, factor: f64) -> Self {
        let f = factor.clamp(0.0, 1.0);
        let scale = |c: u8| (f64::from(c) * f).round() as u8;
        Self::rgb(scale(self.r), scale(self.g), scale(self.b))
    }
}

impl fmt::Display for Color {
    /// `#rrggbb`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_lookup() {
        assert_eq!(Color::from_name("Peru"), Some(Color::PERU));
        assert_eq!(Color::from_name("dimgrey"), Some(Color::DIM_GRAY));
        assert_eq!(Color::from_name("not-a-color"), None);
    }

    #[test]
    fn test_darken() {
        assert_eq!(Color::rgb(200, 100, 50).darken(0.5), Color::rgb(100, 50, 25));
        assert_eq!(Color::PERU.darken(1.0), Color::PERU);
    }

    #[test]
    fn test_hex_display() {
        assert_eq!(Color::TAN.to_string(), "#d2b48c");
    }
}
