//! Physical lengths, font sizes and colours.
//!
//! WordprocessingML measures table geometry in twentieths of a point (twips),
//! drawings in English Metric Units (EMU) and font sizes in half-points.

use serde::{Deserialize, Serialize};

pub const EMU_PER_CM: f64 = 360_000.0;
pub const TWIPS_PER_CM: f64 = 1440.0 / 2.54;

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Centimeters(pub f64);

impl Centimeters {
    pub fn twips(self) -> u32 {
        (self.0 * TWIPS_PER_CM).round().max(0.0) as u32
    }

    pub fn emu(self) -> u64 {
        (self.0 * EMU_PER_CM).round().max(0.0) as u64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Points(pub f64);

impl Points {
    pub fn half_points(self) -> u32 {
        (self.0 * 2.0).round().max(0.0) as u32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Medium green used for badge annotations.
    pub const MEDIUM_GREEN: Rgb = Rgb::new(0, 128, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Six-digit upper-case hex, no leading `#`.
    pub fn hex(self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centimetres_to_twips() {
        assert_eq!(Centimeters(1.0).twips(), 567);
        assert_eq!(Centimeters(2.54).twips(), 1440);
        assert_eq!(Centimeters(9.0).twips(), 5102);
        assert_eq!(Centimeters(6.0).twips(), 3402);
    }

    #[test]
    fn centimetres_to_emu() {
        assert_eq!(Centimeters(4.0).emu(), 1_440_000);
        assert_eq!(Centimeters(0.0).emu(), 0);
    }

    #[test]
    fn points_to_half_points() {
        assert_eq!(Points(18.0).half_points(), 36);
        assert_eq!(Points(14.0).half_points(), 28);
    }

    #[test]
    fn accent_hex() {
        assert_eq!(Rgb::MEDIUM_GREEN.hex(), "008000");
        assert_eq!(Rgb::new(255, 10, 171).hex(), "FF0AAB");
    }
}
