//! Raw CSV loading.
//!
//! Cells are kept verbatim; trimming happens per packed piece during
//! normalization. Only header names are cleaned here.

use std::fs::File;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use tracing::debug;

use crate::error::{IngestError, Result};

/// Header row plus data rows of an attendee CSV.
#[derive(Debug, Clone, Default)]
pub struct AttendeeTable {
    pub headers: Vec<String>,
    pub rows: Vec<TableRow>,
}

/// One data row with its line number in the source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub line: u64,
    pub values: Vec<String>,
}

impl TableRow {
    pub fn get(&self, index: usize) -> Option<&str> {
        self.values.get(index).map(String::as_str)
    }
}

/// Strips a UTF-8 BOM, trims, and collapses internal whitespace runs.
pub fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

/// Read the attendee CSV at `path`. The first record is the header row.
pub fn read_attendee_table(path: &Path) -> Result<AttendeeTable> {
    let file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(file);

    let mut records = reader.records();
    let Some(header) = records.next() else {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    };
    let header = header.map_err(|e| csv_error(path, &e))?;
    let headers: Vec<String> = header.iter().map(normalize_header).collect();

    let mut rows = Vec::new();
    for record in records {
        let record = record.map_err(|e| csv_error(path, &e))?;
        rows.push(table_row(&record));
    }
    debug!(
        path = %path.display(),
        columns = headers.len(),
        rows = rows.len(),
        "read attendee table"
    );
    Ok(AttendeeTable { headers, rows })
}

fn table_row(record: &StringRecord) -> TableRow {
    TableRow {
        line: record.position().map_or(0, csv::Position::line),
        values: record.iter().map(str::to_string).collect(),
    }
}

fn csv_error(path: &Path, error: &csv::Error) -> IngestError {
    if let csv::ErrorKind::Io(io) = error.kind() {
        return IngestError::FileRead {
            path: path.to_path_buf(),
            source: std::io::Error::new(io.kind(), io.to_string()),
        };
    }
    IngestError::CsvParse {
        path: path.to_path_buf(),
        line: error.position().map(csv::Position::line),
        message: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file
    }

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header("  Organisation  "), "Organisation");
        assert_eq!(
            normalize_header("\u{feff}First name of attendee"),
            "First name of attendee"
        );
        assert_eq!(
            normalize_header("Last  name\tof attendee"),
            "Last name of attendee"
        );
        assert_eq!(normalize_header("   "), "");
    }

    #[test]
    fn test_reads_headers_and_rows() {
        let file = create_temp_csv(b"A,B,C\n1,2,3\n4, 5 ,6\n");
        let table = read_attendee_table(file.path()).unwrap();

        assert_eq!(table.headers, vec!["A", "B", "C"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].values, vec!["1", "2", "3"]);
        // Cells are not trimmed at this stage.
        assert_eq!(table.rows[1].values, vec!["4", " 5 ", "6"]);
    }

    #[test]
    fn test_row_lines_are_one_based() {
        let file = create_temp_csv(b"A,B\nx,y\nz,w\n");
        let table = read_attendee_table(file.path()).unwrap();
        assert_eq!(table.rows[0].line, 2);
        assert_eq!(table.rows[1].line, 3);
    }

    #[test]
    fn test_ragged_rows_are_kept() {
        let file = create_temp_csv(b"A,B,C\n1\n1,2,3,4\n");
        let table = read_attendee_table(file.path()).unwrap();
        assert_eq!(table.rows[0].values, vec!["1"]);
        assert_eq!(table.rows[0].get(2), None);
        assert_eq!(table.rows[1].values.len(), 4);
    }

    #[test]
    fn test_bom_is_stripped_from_header() {
        let file = create_temp_csv("\u{feff}A,B\n1,2\n".as_bytes());
        let table = read_attendee_table(file.path()).unwrap();
        assert_eq!(table.headers, vec!["A", "B"]);
    }

    #[test]
    fn test_quoted_semicolons_stay_in_one_cell() {
        let file = create_temp_csv(b"A,B\n\"Ada; Grace\",\"x, y\"\n");
        let table = read_attendee_table(file.path()).unwrap();
        assert_eq!(table.rows[0].values, vec!["Ada; Grace", "x, y"]);
    }

    #[test]
    fn test_empty_file() {
        let file = create_temp_csv(b"");
        let result = read_attendee_table(file.path());
        assert!(matches!(result, Err(IngestError::EmptyCsv { .. })));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_attendee_table(&dir.path().join("nope.csv"));
        assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
    }

    #[test]
    fn test_invalid_utf8_is_parse_error() {
        let file = create_temp_csv(b"A,B\n\xff\xfe,ok\n");
        let result = read_attendee_table(file.path());
        assert!(matches!(
            result,
            Err(IngestError::CsvParse { line: Some(2), .. })
        ));
    }
}
