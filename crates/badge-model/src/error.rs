use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("badge grid must have at least one row and one column (got {columns}x{rows})")]
    EmptyGrid { columns: usize, rows: usize },
}

pub type Result<T> = std::result::Result<T, ModelError>;
