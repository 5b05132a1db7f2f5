use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading an operations statement.
#[derive(Debug, Error)]
pub enum StatementError {
    #[error("Operations file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read spreadsheet: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("Failed to read CSV file: {0}")]
    Csv(#[from] csv::Error),

    #[error("Operations file has no worksheets: {}", .0.display())]
    NoWorksheet(PathBuf),

    #[error("Required column is missing: {0}")]
    MissingColumn(&'static str),

    #[error("Invalid amount {value:?} in row {row}")]
    InvalidAmount { row: usize, value: String },
}
