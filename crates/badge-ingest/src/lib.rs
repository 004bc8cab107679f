//! Attendee ingestion for the name badge maker.
//!
//! Reads the attendee CSV, resolves the expected columns, and flattens rows
//! that pack several attendees into one line (`"Ada; Grace"`) into one
//! [`AttendeeRecord`](badge_model::AttendeeRecord) per person.

pub mod columns;
pub mod csv_table;
pub mod dedupe;
pub mod error;
pub mod normalize;

use std::path::Path;

use tracing::info;

pub use columns::{
    ADDITIONAL_COLUMN, AttendeeColumns, FIRST_NAME_COLUMN, LAST_NAME_COLUMN, ORGANISATION_COLUMN,
};
pub use csv_table::{AttendeeTable, TableRow, normalize_header, read_attendee_table};
pub use dedupe::{DuplicateAttendee, find_duplicates};
pub use error::{IngestError, Result};
pub use normalize::{
    AttendeeList, PackedRow, SECONDARY_DELIMITER, normalize_row, normalize_table, split_packed,
};

/// Read and normalize the attendee CSV at `path`.
pub fn load_attendees(path: &Path) -> Result<AttendeeList> {
    let table = read_attendee_table(path)?;
    let columns = AttendeeColumns::resolve(&table.headers, path)?;
    let list = normalize_table(&table, &columns, path)?;
    info!(
        path = %path.display(),
        rows = list.source_rows,
        attendees = list.records.len(),
        packed_rows = list.packed_rows,
        "loaded attendees"
    );
    Ok(list)
}
