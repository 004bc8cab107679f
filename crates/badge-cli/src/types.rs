use std::path::PathBuf;

/// Outcome of one badge-maker run.
#[derive(Debug)]
pub struct RunResult {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Data rows read from the CSV (header excluded).
    pub source_rows: usize,
    /// Rows that packed more than one attendee.
    pub packed_rows: usize,
    pub badges: usize,
    /// Badges printed for attendees with every field empty.
    pub blank: usize,
    pub pages: usize,
    pub annotated: usize,
    pub duplicates: usize,
    pub bytes: usize,
}
