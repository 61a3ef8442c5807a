use std::path::PathBuf;

/// Errors raised while loading and processing TCAD exports.
#[derive(Debug, thiserror::Error)]
pub enum OxideError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing or writing error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A parameter field in a column header matched the pattern but is not a number.
    #[error("could not convert {field} value '{value}' to float")]
    InvalidParameter { field: &'static str, value: String },

    /// The file has no header row to take columns from.
    #[error("no columns to parse from file")]
    EmptyFile,

    /// A data row holds more cells than the header declares.
    #[error("row {row}: expected {expected} fields, saw {found}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// The data directory does not exist or is not a directory.
    #[error("data directory not found: {}", .0.display())]
    MissingDirectory(PathBuf),
}

pub type Result<T> = std::result::Result<T, OxideError>;
