use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while cleaning a single file.
///
/// Conversion from Arrow is automatic via `From`, so `?` works across the
/// batch-assembly and serialization boundaries.
#[derive(Debug, Error)]
pub enum CleanError {
    /// Input path does not exist.
    #[error("file not found: {}", .path.display())]
    FileNotFound { path: PathBuf },

    /// File has no header row to select columns from.
    #[error("empty file: {}", .path.display())]
    Empty { path: PathBuf },

    /// Malformed delimited content.
    #[error("failed to parse {}: {}", .path.display(), .source)]
    Parse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A requested column is absent from the file header.
    #[error("column '{column}' not found in {}", .path.display())]
    ColumnNotFound { column: String, path: PathBuf },

    /// Read- or write-side I/O failure.
    #[error("i/o error on {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Batch assembly or serialization failure.
    #[error(transparent)]
    Arrow(#[from] arrow::error::ArrowError),
}

/// Result type for cleaning operations.
pub type CleanResult<T> = Result<T, CleanError>;
