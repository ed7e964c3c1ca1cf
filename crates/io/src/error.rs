use std::fmt;
use std::path::PathBuf;

use symgrid_engine::{MAX_SIZE, MIN_SIZE};

/// Classified failure from loading a matrix. Row and column indices are 0-based;
/// `Display` renders them 1-based.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadError {
    /// Input has no tokens at all.
    MissingSize,
    /// First token is not an integer.
    InvalidSize { token: String },
    /// Declared size outside `1..=20`. Saturates for tokens that overflow `i64`.
    OutOfRangeSize { size: i64 },
    /// A row has the wrong number of tokens.
    MalformedRow { row: usize, expected: usize, found: usize },
    /// A token is not a finite real number.
    InvalidCell { row: usize, col: usize, token: String },
    /// Input ended after `found` complete rows.
    IncompleteMatrix { expected: usize, found: usize },
    /// Data remains after the last required cell.
    TrailingData,
    /// JSON grid input is not an array of arrays of numbers.
    InvalidJson(String),
    /// Input could not be read (not found, permission, I/O fault).
    ResourceUnavailable { path: PathBuf, reason: String },
}

impl LoadError {
    /// Row index for row/cell errors.
    pub fn row(&self) -> Option<usize> {
        match self {
            Self::MalformedRow { row, .. } | Self::InvalidCell { row, .. } => Some(*row),
            _ => None,
        }
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSize => write!(f, "input is empty: expected a matrix size"),
            Self::InvalidSize { token } => {
                write!(f, "matrix size must be an integer, found '{token}'")
            }
            Self::OutOfRangeSize { size } => {
                write!(f, "matrix size must be between {MIN_SIZE} and {MAX_SIZE}, found {size}")
            }
            Self::MalformedRow { row, expected, found } => {
                write!(f, "row {}: expected {expected} values, found {found}", row + 1)
            }
            Self::InvalidCell { row, col, token } => {
                write!(f, "row {}, column {}: '{token}' is not a number", row + 1, col + 1)
            }
            Self::IncompleteMatrix { expected, found } => {
                write!(f, "matrix data is incomplete: expected {expected} rows, found {found}")
            }
            Self::TrailingData => write!(f, "unexpected data after the last matrix row"),
            Self::InvalidJson(msg) => write!(f, "invalid JSON grid: {msg}"),
            Self::ResourceUnavailable { path, reason } => {
                write!(f, "cannot read {}: {reason}", path.display())
            }
        }
    }
}

impl std::error::Error for LoadError {}
