//! Error types for salesdash-core.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for salesdash-core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in salesdash-core.
#[derive(Debug, Error)]
pub enum Error {
    /// The dataset file could not be opened or read.
    #[error("failed to read dataset {}: {message}", path.display())]
    DatasetRead { path: PathBuf, message: String },

    /// A required column is absent from the header row.
    #[error("missing required column '{column}'")]
    MissingColumn { column: String },

    /// A record could not be decoded (wrong field count, bad UTF-8, ...).
    #[error("malformed row at line {line}: {message}")]
    MalformedRow { line: u64, message: String },

    /// A numeric column holds a value that is not a number.
    #[error("invalid number '{value}' in column '{column}' at line {line}")]
    InvalidNumber {
        line: u64,
        column: String,
        value: String,
    },

    /// The temporal column holds a value that is not a recognised date/time.
    #[error("unparseable date '{value}' at line {line}")]
    InvalidDate { line: u64, value: String },

    /// An aggregate with no defined value over zero rows was requested.
    #[error("cannot compute {operation} of '{field}' over an empty table")]
    EmptyAggregate {
        operation: &'static str,
        field: &'static str,
    },

    /// An event name the view-state controller does not recognise.
    #[error("unknown trigger: {0}")]
    UnknownTrigger(String),
}

/// Error families of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Fatal at startup: no dashboard is served without valid data.
    DataLoad,
    /// Fatal at startup: a summary was requested over zero rows.
    EmptyAggregate,
    /// Recoverable: the display selection is retained.
    UnknownTrigger,
}

impl Error {
    /// Classify this error into its family.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::DatasetRead { .. }
            | Error::MissingColumn { .. }
            | Error::MalformedRow { .. }
            | Error::InvalidNumber { .. }
            | Error::InvalidDate { .. } => ErrorKind::DataLoad,
            Error::EmptyAggregate { .. } => ErrorKind::EmptyAggregate,
            Error::UnknownTrigger(_) => ErrorKind::UnknownTrigger,
        }
    }

    /// Whether a running session can continue after this error.
    pub fn is_recoverable(&self) -> bool {
        self.kind() == ErrorKind::UnknownTrigger
    }

    /// Render the error with a recovery hint for terminal output.
    pub fn with_hint(&self) -> String {
        let hint = match self {
            Error::DatasetRead { .. } => "check the --data path points to a readable CSV file",
            Error::MissingColumn { .. } => {
                "the header row needs Date, Total, gross income, Rating, Product line, City, Customer type and Payment"
            }
            Error::MalformedRow { .. } | Error::InvalidNumber { .. } => {
                "fix the offending row in the dataset and restart"
            }
            Error::InvalidDate { .. } => {
                "use YYYY-MM-DD or MM/DD/YYYY dates, or pass --drop-invalid-dates to skip such rows"
            }
            Error::EmptyAggregate { .. } => "the dataset has no data rows",
            Error::UnknownTrigger(_) => {
                "valid triggers are show-all, pick-1..pick-5, help-open and help-close"
            }
        };
        format!("{self}\n  hint: {hint}")
    }
}
