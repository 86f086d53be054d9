//! Display colors used by algorithms to mark their progress.

use std::{fmt, ops::Sub};

use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const RED: Rgb = Rgb::new(255, 0, 0);
    pub const GREEN: Rgb = Rgb::new(0, 255, 0);
    pub const BLUE: Rgb = Rgb::new(0, 0, 255);
    pub const ORANGE: Rgb = Rgb::new(255, 140, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Derives a stable, well-spread color from an arbitrary seed
    pub fn from_seed(seed: u64) -> Self {
        let [r, g, b, ..] = fxhash::hash64(&seed).to_le_bytes();
        Self::new(r, g, b)
    }

    /// Looks up one of the named colors
    pub fn named(name: &str) -> Option<Self> {
        Some(match name.to_ascii_lowercase().as_str() {
            "black" => Self::BLACK,
            "white" => Self::WHITE,
            "red" => Self::RED,
            "green" => Self::GREEN,
            "blue" => Self::BLUE,
            "orange" => Self::ORANGE,
            _ => return None,
        })
    }
}

impl Sub for Rgb {
    type Output = Rgb;

    fn sub(self, rhs: Rgb) -> Rgb {
        Rgb::new(
            self.r.saturating_sub(rhs.r),
            self.g.saturating_sub(rhs.g),
            self.b.saturating_sub(rhs.b),
        )
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_colors() {
        assert_eq!(Rgb::named("Orange"), Some(Rgb::new(255, 140, 0)));
        assert_eq!(Rgb::named("purple"), None);
    }

    #[test]
    fn subtraction_saturates() {
        assert_eq!(Rgb::ORANGE - Rgb::new(100, 200, 1), Rgb::new(155, 0, 0));
    }

    #[test]
    fn seeded_colors_are_stable() {
        assert_eq!(Rgb::from_seed(7), Rgb::from_seed(7));
        assert_ne!(Rgb::from_seed(7), Rgb::from_seed(8));
    }
}
