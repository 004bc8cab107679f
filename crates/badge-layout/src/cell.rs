use badge_model::{AttendeeRecord, Centimeters, GridPosition, Points, Rgb};
use serde::Serialize;

use crate::config::LayoutConfig;

/// One line of badge text. Badge text is always bold and centred.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextLine {
    pub text: String,
    pub size: Points,
    /// `None` keeps the document's default text colour.
    pub color: Option<Rgb>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LogoRegion {
    pub width: Centimeters,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextRegion {
    pub width: Centimeters,
    pub lines: Vec<TextLine>,
}

/// Render plan for one badge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BadgeCell {
    pub position: GridPosition,
    pub logo: LogoRegion,
    pub text: TextRegion,
}

impl BadgeCell {
    /// Lay out `record` at `position`: name, organisation, then the
    /// annotation in the accent colour when there is one.
    pub fn for_record(record: &AttendeeRecord, position: GridPosition, config: &LayoutConfig) -> Self {
        let mut lines = vec![
            TextLine {
                text: record.display_name(),
                size: config.name_size,
                color: None,
            },
            TextLine {
                text: record.organisation.clone(),
                size: config.detail_size,
                color: None,
            },
        ];
        if let Some(annotation) = record.annotation() {
            lines.push(TextLine {
                text: annotation.to_string(),
                size: config.detail_size,
                color: Some(config.accent),
            });
        }
        Self {
            position,
            logo: LogoRegion {
                width: config.logo_width,
            },
            text: TextRegion {
                width: config.text_width,
                lines,
            },
        }
    }

    pub fn annotated(&self) -> bool {
        self.text.lines.len() > 2
    }
}
