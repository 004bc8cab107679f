use badge_model::{Centimeters, GridSpec, Points, Rgb};
use serde::{Deserialize, Serialize};

/// Fixed geometry and typography of the badge sheet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub grid: GridSpec,
    pub page_width: Centimeters,
    pub page_height: Centimeters,
    /// Margin on all four page edges.
    pub page_margin: Centimeters,
    pub badge_width: Centimeters,
    pub badge_height: Centimeters,
    /// Width of the logo region on the left of each badge.
    pub logo_width: Centimeters,
    /// Width of the text region on the right of each badge.
    pub text_width: Centimeters,
    pub name_size: Points,
    /// Font size for the organisation and annotation lines.
    pub detail_size: Points,
    /// Colour of the annotation line.
    pub accent: Rgb,
}

impl LayoutConfig {
    /// Total width of one row of badges.
    pub fn sheet_width(&self) -> Centimeters {
        Centimeters(self.badge_width.0 * self.grid.badges_per_row() as f64)
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            grid: GridSpec::BADGE_SHEET,
            // A4 portrait
            page_width: Centimeters(21.0),
            page_height: Centimeters(29.7),
            page_margin: Centimeters(1.0),
            badge_width: Centimeters(9.0),
            badge_height: Centimeters(6.0),
            logo_width: Centimeters(4.0),
            text_width: Centimeters(5.0),
            name_size: Points(18.0),
            detail_size: Points(14.0),
            accent: Rgb::MEDIUM_GREEN,
        }
    }
}
