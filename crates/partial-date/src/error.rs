//! Error types for partial-date operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PartialDateError {
    /// The input is not one of the accepted notation shapes, names a
    /// disallowed component combination, or does not form a calendar date.
    #[error("Malformed partial date: '{0}'")]
    MalformedPartialDate(String),

    /// A stored precision integer carries bits outside YEAR, MONTH and DAY.
    #[error("Invalid precision: {0}")]
    InvalidPrecision(u8),

    #[error("Invalid field name: '{0}'")]
    InvalidFieldName(String),

    /// The rows being filtered have no precision column with this name.
    #[error("Unknown field: '{0}'")]
    UnknownField(String),
}

pub type Result<T> = std::result::Result<T, PartialDateError>;
