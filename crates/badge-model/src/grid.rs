//! Badge grid arithmetic.
//!
//! Badges fill a page left to right, then top to bottom. A badge's position is
//! a pure function of its index in the attendee sequence.

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Placement of one badge on the printed sheet (all indices zero-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GridPosition {
    pub page: usize,
    pub row: usize,
    pub column: usize,
}

/// Number of badge columns and rows on one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GridShape")]
pub struct GridSpec {
    badges_per_row: usize,
    badges_per_column: usize,
}

impl GridSpec {
    /// Two badges across, four down.
    pub const BADGE_SHEET: GridSpec = GridSpec {
        badges_per_row: 2,
        badges_per_column: 4,
    };

    pub fn new(badges_per_row: usize, badges_per_column: usize) -> Result<Self> {
        if badges_per_row == 0 || badges_per_column == 0 {
            return Err(ModelError::EmptyGrid {
                columns: badges_per_row,
                rows: badges_per_column,
            });
        }
        Ok(Self {
            badges_per_row,
            badges_per_column,
        })
    }

    pub fn badges_per_row(&self) -> usize {
        self.badges_per_row
    }

    pub fn badges_per_column(&self) -> usize {
        self.badges_per_column
    }

    pub fn badges_per_page(&self) -> usize {
        self.badges_per_row * self.badges_per_column
    }

    pub fn position_of(&self, index: usize) -> GridPosition {
        let per_page = self.badges_per_page();
        let slot = index % per_page;
        GridPosition {
            page: index / per_page,
            row: slot / self.badges_per_row,
            column: slot % self.badges_per_row,
        }
    }

    /// Pages needed for `count` badges.
    pub fn page_count(&self, count: usize) -> usize {
        count.div_ceil(self.badges_per_page())
    }

    /// True when the badge at `index` is the first on its page.
    pub fn starts_page(&self, index: usize) -> bool {
        index % self.badges_per_page() == 0
    }

    /// True when a page break must be emitted before the badge at `index`.
    pub fn breaks_page_before(&self, index: usize) -> bool {
        index > 0 && self.starts_page(index)
    }
}

/// Unchecked wire form of [`GridSpec`].
#[derive(Deserialize)]
struct GridShape {
    badges_per_row: usize,
    badges_per_column: usize,
}

impl TryFrom<GridShape> for GridSpec {
    type Error = ModelError;

    fn try_from(shape: GridShape) -> Result<Self> {
        Self::new(shape.badges_per_row, shape.badges_per_column)
    }
}

impl Default for GridSpec {
    fn default() -> Self {
        Self::BADGE_SHEET
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use proptest::prelude::*;

    use super::*;

    #[test]
    fn default_sheet_is_two_by_four() {
        let grid = GridSpec::default();
        assert_eq!(grid.badges_per_row(), 2);
        assert_eq!(grid.badges_per_column(), 4);
        assert_eq!(grid.badges_per_page(), 8);
    }

    #[test]
    fn rejects_empty_grid() {
        assert_eq!(
            GridSpec::new(0, 4),
            Err(ModelError::EmptyGrid {
                columns: 0,
                rows: 4
            })
        );
        assert!(GridSpec::new(2, 0).is_err());
    }

    #[test]
    fn deserialized_grid_is_validated() {
        let grid: GridSpec =
            serde_json::from_str(r#"{"badges_per_row":3,"badges_per_column":1}"#).unwrap();
        assert_eq!(grid.badges_per_page(), 3);

        let error = serde_json::from_str::<GridSpec>(r#"{"badges_per_row":0,"badges_per_column":4}"#)
            .unwrap_err();
        assert!(error.to_string().contains("got 0x4"), "{error}");
    }

    #[test]
    fn fills_rows_left_to_right() {
        let grid = GridSpec::BADGE_SHEET;
        let expected = [(0, 0), (0, 1), (1, 0), (1, 1), (2, 0), (2, 1), (3, 0), (3, 1)];
        for (index, (row, column)) in expected.into_iter().enumerate() {
            assert_eq!(
                grid.position_of(index),
                GridPosition {
                    page: 0,
                    row,
                    column
                }
            );
        }
    }

    #[test]
    fn ninth_badge_opens_second_page() {
        let grid = GridSpec::BADGE_SHEET;
        assert_eq!(
            grid.position_of(8),
            GridPosition {
                page: 1,
                row: 0,
                column: 0
            }
        );
        assert_eq!(grid.page_count(9), 2);
        assert!(grid.breaks_page_before(8));
    }

    #[test]
    fn first_badge_starts_page_without_break() {
        let grid = GridSpec::BADGE_SHEET;
        assert!(grid.starts_page(0));
        assert!(!grid.breaks_page_before(0));
        assert!(!grid.breaks_page_before(7));
    }

    #[test]
    fn page_count_edges() {
        let grid = GridSpec::BADGE_SHEET;
        assert_eq!(grid.page_count(0), 0);
        assert_eq!(grid.page_count(1), 1);
        assert_eq!(grid.page_count(8), 1);
        assert_eq!(grid.page_count(16), 2);
        assert_eq!(grid.page_count(17), 3);
    }

    proptest! {
        #[test]
        fn positions_are_unique_and_cover_pages(count in 0usize..200) {
            let grid = GridSpec::BADGE_SHEET;
            let positions: Vec<GridPosition> = (0..count).map(|i| grid.position_of(i)).collect();
            let unique: BTreeSet<GridPosition> = positions.iter().copied().collect();
            prop_assert_eq!(unique.len(), count);

            let pages: BTreeSet<usize> = positions.iter().map(|p| p.page).collect();
            prop_assert_eq!(pages.len(), grid.page_count(count));

            // Fill order matches sequence order.
            prop_assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
            for position in &positions {
                prop_assert!(position.row < grid.badges_per_column());
                prop_assert!(position.column < grid.badges_per_row());
            }
        }
    }
}
