//! Column resolution for the attendee CSV.

use std::path::Path;

use crate::csv_table::TableRow;
use crate::error::{IngestError, Result};
use crate::normalize::PackedRow;

pub const FIRST_NAME_COLUMN: &str = "First name of attendee";
pub const LAST_NAME_COLUMN: &str = "Last name of attendee";
pub const ORGANISATION_COLUMN: &str = "Organisation";
pub const ADDITIONAL_COLUMN: &str = "additional";

/// Positions of the attendee columns in the header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttendeeColumns {
    pub first_name: usize,
    pub last_name: usize,
    pub organisation: usize,
    pub additional: Option<usize>,
}

impl AttendeeColumns {
    /// Locate the attendee columns. Matching ignores ASCII case; the
    /// `additional` column is optional.
    pub fn resolve(headers: &[String], path: &Path) -> Result<Self> {
        let required = |column: &str| {
            find_column(headers, column).ok_or_else(|| IngestError::MissingColumn {
                column: column.to_string(),
                path: path.to_path_buf(),
            })
        };
        Ok(Self {
            first_name: required(FIRST_NAME_COLUMN)?,
            last_name: required(LAST_NAME_COLUMN)?,
            organisation: required(ORGANISATION_COLUMN)?,
            additional: find_column(headers, ADDITIONAL_COLUMN),
        })
    }

    /// Borrow the four packed fields of `row`.
    ///
    /// A row too short for a required column is an error. A row too short for
    /// the `additional` column is read as if the column were absent.
    pub fn packed_row<'a>(&self, row: &'a TableRow, path: &Path) -> Result<PackedRow<'a>> {
        let required = |index: usize, column: &str| {
            row.get(index).ok_or_else(|| IngestError::MissingField {
                column: column.to_string(),
                line: row.line,
                path: path.to_path_buf(),
            })
        };
        Ok(PackedRow {
            first_names: required(self.first_name, FIRST_NAME_COLUMN)?,
            last_names: required(self.last_name, LAST_NAME_COLUMN)?,
            organisations: required(self.organisation, ORGANISATION_COLUMN)?,
            additional: self.additional.and_then(|index| row.get(index)),
        })
    }
}

fn find_column(headers: &[String], name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|header| header.eq_ignore_ascii_case(name))
}
