//! Error types for the CODA parser.

use thiserror::Error;

/// Result type alias for parser operations
pub type Result<T> = std::result::Result<T, ParseError>;

/// Errors that can occur while lexing raw CODA lines or running the CLI.
///
/// Grouping and statement assembly are total and never produce errors;
/// everything here originates in the fixed-width decode or in I/O.
#[derive(Error, Debug)]
pub enum ParseError {
    /// Failed to open or read the input file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV output error
    #[error("CSV output error: {0}")]
    Csv(#[from] csv::Error),

    /// Line is shorter than the fields its record kind requires
    #[error("Line {row} is too short for its record kind ({length} characters)")]
    LineTooShort { row: usize, length: usize },

    /// Leading record-type digit is not one of the known kinds
    #[error("Line {row} has unknown record kind '{tag}'")]
    UnknownRecordKind { row: usize, tag: String },

    /// A DDMMYY date field did not decode to a calendar date
    #[error("Line {row} has invalid date field '{value}'")]
    InvalidDate { row: usize, value: String },

    /// A sign + 15 digit amount field did not decode
    #[error("Line {row} has invalid amount field '{value}'")]
    InvalidAmount { row: usize, value: String },

    /// A numeric field (sequence or detail number) did not decode
    #[error("Line {row} has invalid numeric field '{value}'")]
    InvalidNumber { row: usize, value: String },

    /// Missing input file argument
    #[error("Missing input file argument. Usage: coda-parser <statement.cod>")]
    MissingArgument,
}
