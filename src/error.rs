//! Application error types.

use std::path::PathBuf;

use thiserror::Error;

/// Application-level errors for Polnet.
#[derive(Error, Debug)]
pub enum AppError {
    // Data source errors
    #[error("failed to read {path}: {source}")]
    DataFetch {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    // Config errors
    #[error("configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    // Export errors
    #[error("export failed: {0}")]
    Export(String),
}

/// A single unusable CSV row.
///
/// Rows are skipped and counted rather than aborting the load; this type
/// exists so the skip reason reaches the log with its line number.
#[derive(Error, Debug)]
#[error("malformed row at line {line}: {reason}")]
pub struct RowError {
    /// 1-based line number in the source file.
    pub line: u64,
    /// What made the row unusable.
    pub reason: String,
}

impl RowError {
    pub fn new(line: u64, reason: impl Into<String>) -> Self {
        Self {
            line,
            reason: reason.into(),
        }
    }
}
