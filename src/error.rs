//! Error types for the balance engine.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors that stop a run.
///
/// These all belong to the I/O layer around the aggregation core. The core
/// itself never fails: malformed rows are reported as [`RecordError`] and
/// skipped.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Generic I/O failure while reading or writing
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reader or writer failure
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The input file could not be opened
    #[error("cannot open input file {}: {source}", path.display())]
    OpenInput {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The output file could not be created
    #[error("cannot create output file {}: {source}", path.display())]
    CreateOutput {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl EngineError {
    /// Process exit status for this error. Each resource failure gets its own
    /// code; 2 is left to the argument parser for usage errors.
    pub fn exit_code(&self) -> i32 {
        match self {
            EngineError::Io(_) | EngineError::Csv(_) => 1,
            EngineError::OpenInput { .. } => 3,
            EngineError::CreateOutput { .. } => 4,
        }
    }
}

/// Reasons a single input record is rejected by the parser.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("expected 3 fields, found {0}")]
    FieldCount(usize),

    #[error("field {0} is empty")]
    EmptyField(usize),

    #[error("invalid date {0:?}, expected MM/DD/YYYY")]
    InvalidDate(String),

    #[error("invalid amount {0:?}")]
    InvalidAmount(String),
}

/// Invalid configuration value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown balance mode {0:?}, expected \"reset\" or \"carry-forward\"")]
    UnknownBalanceMode(String),
}
