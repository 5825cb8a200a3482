use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum MortgageError {
    #[error("invalid input for {field}: {message}")]
    InvalidInput {
        field: &'static str,
        message: String,
    },

    #[error("calculation error: {message}")]
    CalculationError {
        message: String,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },

    #[error("unsupported snapshot version: found {found}, expected {expected}")]
    UnsupportedSnapshotVersion {
        found: u32,
        expected: u32,
    },

    #[error("history entry not found: {id}")]
    HistoryEntryNotFound {
        id: Uuid,
    },

    #[error("remote calculator unavailable: {message}")]
    RemoteUnavailable {
        message: String,
    },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl MortgageError {
    pub(crate) fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        MortgageError::InvalidInput {
            field,
            message: message.into(),
        }
    }

    pub(crate) fn overflow(what: impl std::fmt::Display) -> Self {
        MortgageError::CalculationError {
            message: format!("{what} overflows the decimal range"),
        }
    }

    /// true when the caller supplied bad input, as opposed to a failure to compute
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, MortgageError::InvalidInput { .. })
    }
}

pub type Result<T> = std::result::Result<T, MortgageError>;
