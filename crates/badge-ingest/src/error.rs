//! Error types for attendee ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading the attendee list.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// CSV file not found.
    #[error("CSV file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === CSV Parsing Errors ===
    /// Malformed CSV content.
    #[error("failed to parse CSV {path}{}: {message}", line_suffix(.line))]
    CsvParse {
        path: PathBuf,
        line: Option<u64>,
        message: String,
    },

    /// CSV file has no header row.
    #[error("CSV file is empty: {path}")]
    EmptyCsv { path: PathBuf },

    // === Schema Errors ===
    /// Required column not found in the header row.
    #[error("required column '{column}' not found in {path}")]
    MissingColumn { column: String, path: PathBuf },

    /// Data row too short to hold a required column.
    #[error("row at line {line} of {path} has no value for required column '{column}'")]
    MissingField {
        column: String,
        line: u64,
        path: PathBuf,
    },
}

fn line_suffix(line: &Option<u64>) -> String {
    line.map(|line| format!(" at line {line}"))
        .unwrap_or_default()
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::FileNotFound {
            path: PathBuf::from("/path/to/attendees.csv"),
        };
        assert_eq!(err.to_string(), "CSV file not found: /path/to/attendees.csv");
    }

    #[test]
    fn test_missing_field_names_row() {
        let err = IngestError::MissingField {
            column: "Organisation".to_string(),
            line: 4,
            path: PathBuf::from("attendees.csv"),
        };
        assert_eq!(
            err.to_string(),
            "row at line 4 of attendees.csv has no value for required column 'Organisation'"
        );
    }

    #[test]
    fn test_csv_parse_line_suffix() {
        let with_line = IngestError::CsvParse {
            path: PathBuf::from("a.csv"),
            line: Some(3),
            message: "invalid utf-8".to_string(),
        };
        assert_eq!(
            with_line.to_string(),
            "failed to parse CSV a.csv at line 3: invalid utf-8"
        );
        let without_line = IngestError::CsvParse {
            path: PathBuf::from("a.csv"),
            line: None,
            message: "boom".to_string(),
        };
        assert_eq!(without_line.to_string(), "failed to parse CSV a.csv: boom");
    }
}
