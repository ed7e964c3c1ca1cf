//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract; scripts rely on them.
//!
//! # Exit Code Ranges
//!
//! | Code | Domain    | Description                                       |
//! |------|-----------|---------------------------------------------------|
//! | 0    | Universal | Success (whether or not any row is symmetric)     |
//! | 1    | Universal | General error (unspecified)                       |
//! | 2    | Universal | CLI usage error (bad args, bad --set edit)        |
//! | 3    | load      | Input unavailable (not found, permission, I/O)    |
//! | 4    | load      | Malformed or incomplete matrix data               |
//! | 5    | load      | Declared size outside 1..=20                      |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant in the appropriate range
//! 2. Document what triggers it
//! 3. Update the table above
//! 4. Wire it into the relevant command's error handling

use serde::Serialize;
use symgrid_io::LoadError;

// =============================================================================
// Universal (0-2)
// =============================================================================

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

// =============================================================================
// Load (3-5)
// =============================================================================

/// Input file or stdin could not be read.
pub const EXIT_LOAD_UNAVAILABLE: u8 = 3;

/// Matrix data is malformed: bad row width, non-numeric cell, missing rows,
/// trailing data, missing or non-integer size, invalid JSON.
pub const EXIT_LOAD_DATA: u8 = 4;

/// Declared matrix size outside 1..=20.
pub const EXIT_LOAD_SIZE: u8 = 5;

// =============================================================================
// Load Error Types
// =============================================================================

/// Map a LoadError to its exit code.
pub fn load_exit_code(err: &LoadError) -> u8 {
    match err {
        LoadError::ResourceUnavailable { .. } => EXIT_LOAD_UNAVAILABLE,
        LoadError::OutOfRangeSize { .. } => EXIT_LOAD_SIZE,
        LoadError::MissingSize
        | LoadError::InvalidSize { .. }
        | LoadError::MalformedRow { .. }
        | LoadError::InvalidCell { .. }
        | LoadError::IncompleteMatrix { .. }
        | LoadError::TrailingData
        | LoadError::InvalidJson(_) => EXIT_LOAD_DATA,
    }
}

/// Stable machine-readable name for a LoadError.
pub fn load_error_kind(err: &LoadError) -> &'static str {
    match err {
        LoadError::MissingSize => "missing_size",
        LoadError::InvalidSize { .. } => "invalid_size",
        LoadError::OutOfRangeSize { .. } => "out_of_range_size",
        LoadError::MalformedRow { .. } => "malformed_row",
        LoadError::InvalidCell { .. } => "invalid_cell",
        LoadError::IncompleteMatrix { .. } => "incomplete_matrix",
        LoadError::TrailingData => "trailing_data",
        LoadError::InvalidJson(_) => "invalid_json",
        LoadError::ResourceUnavailable { .. } => "resource_unavailable",
    }
}

/// Structured error output for `--json` mode.
/// Positions are 1-based, matching the human-readable message.
#[derive(Debug, Serialize)]
pub struct LoadErrorOutput {
    pub error: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
    pub exit_code: u8,
}

impl LoadErrorOutput {
    pub fn from_load_error(err: &LoadError) -> Self {
        let column = match err {
            LoadError::InvalidCell { col, .. } => Some(col + 1),
            _ => None,
        };
        Self {
            error: load_error_kind(err),
            message: err.to_string(),
            row: err.row().map(|r| r + 1),
            column,
            exit_code: load_exit_code(err),
        }
    }
}
