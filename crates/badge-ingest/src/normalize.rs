//! Record normalization.
//!
//! A CSV row may pack several attendees that share it: every field holds a
//! `;`-separated list and the n-th pieces of all lists form one attendee.
//! Lists of unequal length are padded with empty text instead of rejected.

use std::path::Path;

use badge_model::AttendeeRecord;
use tracing::debug;

use crate::columns::AttendeeColumns;
use crate::csv_table::AttendeeTable;
use crate::error::Result;

/// Separator between attendees packed into one cell.
pub const SECONDARY_DELIMITER: char = ';';

/// The four raw fields of one CSV row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackedRow<'a> {
    pub first_names: &'a str,
    pub last_names: &'a str,
    pub organisations: &'a str,
    /// `None` when the row has no `additional` column at all.
    pub additional: Option<&'a str>,
}

/// Split a packed cell and trim every piece. An empty cell yields one empty
/// piece.
pub fn split_packed(value: &str) -> Vec<String> {
    value
        .split(SECONDARY_DELIMITER)
        .map(|piece| piece.trim().to_string())
        .collect()
}

/// Expand one packed row into attendee records, in list order.
pub fn normalize_row(row: &PackedRow<'_>) -> Vec<AttendeeRecord> {
    let mut first_names = split_packed(row.first_names);
    let mut last_names = split_packed(row.last_names);
    let mut organisations = split_packed(row.organisations);
    // The absent-column default is sized from the first-name list and must be
    // in place before the padding length is taken.
    let mut additionals = match row.additional {
        Some(value) => split_packed(value),
        None => vec![String::new(); first_names.len()],
    };

    let max_len = first_names
        .len()
        .max(last_names.len())
        .max(organisations.len())
        .max(additionals.len());
    for list in [
        &mut first_names,
        &mut last_names,
        &mut organisations,
        &mut additionals,
    ] {
        list.resize(max_len, String::new());
    }

    first_names
        .into_iter()
        .zip(last_names)
        .zip(organisations)
        .zip(additionals)
        .map(|(((first, last), organisation), additional)| {
            AttendeeRecord::new(first, last, organisation, additional)
        })
        .collect()
}

/// Attendees flattened from one CSV table.
#[derive(Debug, Clone, Default)]
pub struct AttendeeList {
    /// Flat attendee sequence in input order.
    pub records: Vec<AttendeeRecord>,
    /// Data rows read from the file (header excluded).
    pub source_rows: usize,
    /// Rows that packed more than one attendee.
    pub packed_rows: usize,
    /// Records with every field empty. They still get a badge.
    pub blank_records: usize,
    /// Whether the file has an `additional` column.
    pub has_additional_column: bool,
}

/// Normalize every row of `table`, preserving row order.
pub fn normalize_table(
    table: &AttendeeTable,
    columns: &AttendeeColumns,
    path: &Path,
) -> Result<AttendeeList> {
    let mut records = Vec::with_capacity(table.rows.len());
    let mut packed_rows = 0usize;
    let mut blank_records = 0usize;
    for row in &table.rows {
        let packed = columns.packed_row(row, path)?;
        let attendees = normalize_row(&packed);
        if attendees.len() > 1 {
            packed_rows += 1;
            debug!(line = row.line, attendees = attendees.len(), "row packs several attendees");
        }
        let blanks = attendees.iter().filter(|record| record.is_blank()).count();
        if blanks > 0 {
            blank_records += blanks;
            debug!(line = row.line, blanks, "row yields blank badges");
        }
        records.extend(attendees);
    }
    Ok(AttendeeList {
        records,
        source_rows: table.rows.len(),
        packed_rows,
        blank_records,
        has_additional_column: columns.additional.is_some(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn packed<'a>(
        first: &'a str,
        last: &'a str,
        organisation: &'a str,
        additional: Option<&'a str>,
    ) -> PackedRow<'a> {
        PackedRow {
            first_names: first,
            last_names: last,
            organisations: organisation,
            additional,
        }
    }

    #[test]
    fn split_trims_pieces() {
        assert_eq!(split_packed(" Ada ;Grace;  Alan"), vec!["Ada", "Grace", "Alan"]);
        assert_eq!(split_packed(""), vec![""]);
        assert_eq!(split_packed("a;"), vec!["a", ""]);
    }

    #[test]
    fn single_attendee_row() {
        let records = normalize_row(&packed("Ada", "Lovelace", "AE Ltd", Some("Plenary")));
        assert_eq!(
            records,
            vec![AttendeeRecord::new("Ada", "Lovelace", "AE Ltd", "Plenary")]
        );
    }

    #[test]
    fn packed_row_zips_positionally() {
        let records = normalize_row(&packed(
            "Ada; Grace",
            "Lovelace; Hopper",
            "AE Ltd; US Navy",
            Some("Plenary; Committee"),
        ));
        assert_eq!(
            records,
            vec![
                AttendeeRecord::new("Ada", "Lovelace", "AE Ltd", "Plenary"),
                AttendeeRecord::new("Grace", "Hopper", "US Navy", "Committee"),
            ]
        );
    }

    #[test]
    fn shorter_lists_are_padded() {
        let records = normalize_row(&packed("Ada; Grace", "Lovelace; Hopper", "Shared Org", Some("")));
        assert_eq!(
            records,
            vec![
                AttendeeRecord::new("Ada", "Lovelace", "Shared Org", ""),
                AttendeeRecord::new("Grace", "Hopper", "", ""),
            ]
        );
    }

    #[test]
    fn longest_list_wins_even_if_not_first_name() {
        let records = normalize_row(&packed("Ada", "Lovelace", "A; B; C", None));
        assert_eq!(records.len(), 3);
        assert_eq!(records[2], AttendeeRecord::new("", "", "C", ""));
    }

    #[test]
    fn absent_annotation_column_defaults_to_empty() {
        let records = normalize_row(&packed("Ada; Grace", "Lovelace; Hopper", "X; Y", None));
        assert!(records.iter().all(|record| record.additional.is_none()));
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn annotation_list_can_extend_row() {
        let records = normalize_row(&packed("Ada", "Lovelace", "AE", Some("Plenary; Dinner")));
        assert_eq!(
            records,
            vec![
                AttendeeRecord::new("Ada", "Lovelace", "AE", "Plenary"),
                AttendeeRecord::new("", "", "", "Dinner"),
            ]
        );
    }

    #[test]
    fn empty_row_yields_one_blank_record() {
        let records = normalize_row(&packed("", "", "", None));
        assert_eq!(records, vec![AttendeeRecord::default()]);
    }
}
