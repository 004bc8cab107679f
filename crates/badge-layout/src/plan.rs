use badge_model::{AttendeeRecord, GridSpec};
use serde::Serialize;
use tracing::debug;

use crate::cell::BadgeCell;
use crate::config::LayoutConfig;

/// One printed page of badges, cells in fill order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BadgePage {
    pub index: usize,
    pub cells: Vec<BadgeCell>,
}

impl BadgePage {
    pub fn cell_at(&self, row: usize, column: usize) -> Option<&BadgeCell> {
        self.cells
            .iter()
            .find(|cell| cell.position.row == row && cell.position.column == column)
    }
}

/// All pages of a badge sheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BadgePlan {
    pub grid: GridSpec,
    pub pages: Vec<BadgePage>,
}

impl BadgePlan {
    pub fn badge_count(&self) -> usize {
        self.pages.iter().map(|page| page.cells.len()).sum()
    }

    /// Page breaks between pages; the first page never has one.
    pub fn page_breaks(&self) -> usize {
        self.pages.len().saturating_sub(1)
    }

    pub fn annotated_count(&self) -> usize {
        self.cells().filter(|cell| cell.annotated()).count()
    }

    pub fn cells(&self) -> impl Iterator<Item = &BadgeCell> {
        self.pages.iter().flat_map(|page| page.cells.iter())
    }
}

/// Place every attendee on the badge grid, in sequence order.
pub fn plan_badges(records: &[AttendeeRecord], config: &LayoutConfig) -> BadgePlan {
    let grid = config.grid;
    let mut pages: Vec<BadgePage> = Vec::with_capacity(grid.page_count(records.len()));
    for (index, record) in records.iter().enumerate() {
        let position = grid.position_of(index);
        if grid.starts_page(index) {
            pages.push(BadgePage {
                index: position.page,
                cells: Vec::with_capacity(grid.badges_per_page()),
            });
        }
        let cell = BadgeCell::for_record(record, position, config);
        if let Some(page) = pages.last_mut() {
            page.cells.push(cell);
        }
    }
    debug!(
        badges = records.len(),
        pages = pages.len(),
        "planned badge sheet"
    );
    BadgePlan { grid, pages }
}
