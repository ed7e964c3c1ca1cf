// Square grid of finite numbers, the unit of work for symmetry analysis

use std::fmt;

use serde::Serialize;

/// Largest accepted grid dimension.
pub const MAX_SIZE: usize = 20;

/// Smallest accepted grid dimension.
pub const MIN_SIZE: usize = 1;

/// Errors raised when constructing or editing a [`Grid`].
#[derive(Debug, Clone, PartialEq)]
pub enum GridError {
    /// Requested dimension is outside `MIN_SIZE..=MAX_SIZE`.
    SizeOutOfRange { size: usize },
    /// A row does not have exactly `size` cells.
    RaggedRow { row: usize, len: usize, size: usize },
    /// A cell value is NaN or infinite.
    NonFinite { row: usize, col: usize },
    /// Coordinates fall outside the grid.
    CellOutOfBounds { row: usize, col: usize, size: usize },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SizeOutOfRange { size } => {
                write!(f, "grid size {size} is outside {MIN_SIZE}..={MAX_SIZE}")
            }
            Self::RaggedRow { row, len, size } => {
                write!(f, "row {}: expected {size} cells, found {len}", row + 1)
            }
            Self::NonFinite { row, col } => {
                write!(f, "row {}, column {}: value is not a finite number", row + 1, col + 1)
            }
            Self::CellOutOfBounds { row, col, size } => {
                write!(f, "cell ({}, {}) is outside a {size}x{size} grid", row + 1, col + 1)
            }
        }
    }
}

impl std::error::Error for GridError {}

/// An N×N matrix of finite `f64` values, `1 <= N <= 20`, stored row-major.
///
/// Every constructor and mutator checks the shape and finiteness invariants,
/// so any `Grid` value can be handed to the analyzer as-is.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Grid {
    size: usize,
    rows: Vec<Vec<f64>>,
}

impl Grid {
    /// Allocate a zero-filled grid, the starting point for manual entry.
    pub fn new(size: usize) -> Result<Self, GridError> {
        Self::filled(size, 0.0)
    }

    pub fn filled(size: usize, value: f64) -> Result<Self, GridError> {
        check_size(size)?;
        if !value.is_finite() {
            return Err(GridError::NonFinite { row: 0, col: 0 });
        }
        Ok(Self {
            size,
            rows: vec![vec![value; size]; size],
        })
    }

    /// Build a grid from parsed rows. The number of rows sets the size.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, GridError> {
        let size = rows.len();
        check_size(size)?;

        for (row, cells) in rows.iter().enumerate() {
            if cells.len() != size {
                return Err(GridError::RaggedRow { row, len: cells.len(), size });
            }
            if let Some(col) = cells.iter().position(|v| !v.is_finite()) {
                return Err(GridError::NonFinite { row, col });
            }
        }

        Ok(Self { size, rows })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.rows.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Set a single cell. Rejects out-of-bounds coordinates and non-finite values.
    pub fn set(&mut self, row: usize, col: usize, value: f64) -> Result<(), GridError> {
        if row >= self.size || col >= self.size {
            return Err(GridError::CellOutOfBounds { row, col, size: self.size });
        }
        if !value.is_finite() {
            return Err(GridError::NonFinite { row, col });
        }
        self.rows[row][col] = value;
        Ok(())
    }

    pub fn row(&self, row: usize) -> Option<&[f64]> {
        self.rows.get(row).map(Vec::as_slice)
    }

    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[f64]> + '_ {
        self.rows.iter().map(Vec::as_slice)
    }

    pub fn into_rows(self) -> Vec<Vec<f64>> {
        self.rows
    }
}

fn check_size(size: usize) -> Result<(), GridError> {
    if (MIN_SIZE..=MAX_SIZE).contains(&size) {
        Ok(())
    } else {
        Err(GridError::SizeOutOfRange { size })
    }
}
