//! Row-wise symmetry analysis.
//!
//! A row is symmetric when it reads the same left-to-right as right-to-left.
//!
//! # Precision caveat
//!
//! Cells are compared with exact IEEE-754 equality. No tolerance is applied:
//! `[1.0, 2.0, 1.0000001]` is *not* symmetric. Callers working with computed
//! values that carry rounding noise should round before building the grid.
//! Since the comparison is `==`, `-0.0` and `0.0` count as equal.

use std::fmt;

use serde::Serialize;

use crate::grid::Grid;

/// Finding for a single row. `row` is 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RowFinding {
    pub row: usize,
    pub symmetric: bool,
}

/// Per-row findings in ascending row order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SymmetryReport {
    findings: Vec<RowFinding>,
}

impl SymmetryReport {
    pub fn findings(&self) -> &[RowFinding] {
        &self.findings
    }

    /// 0-based indices of symmetric rows, ascending.
    pub fn symmetric_rows(&self) -> impl Iterator<Item = usize> + '_ {
        self.findings.iter().filter(|f| f.symmetric).map(|f| f.row)
    }

    pub fn any_symmetric(&self) -> bool {
        self.findings.iter().any(|f| f.symmetric)
    }

    /// True when no row is symmetric; the caller prints a single
    /// "No symmetry found." line in that case.
    pub fn none_symmetric(&self) -> bool {
        !self.any_symmetric()
    }

    pub fn len(&self) -> usize {
        self.findings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }
}

impl fmt::Display for SymmetryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.none_symmetric() {
            return writeln!(f, "No symmetry found.");
        }
        for row in self.symmetric_rows() {
            writeln!(f, "Row {} is symmetric", row + 1)?;
        }
        Ok(())
    }
}

/// Two-pointer palindrome check with exact equality.
pub fn is_row_symmetric(cells: &[f64]) -> bool {
    if cells.is_empty() {
        return true;
    }
    let mut left = 0;
    let mut right = cells.len() - 1;
    while left < right {
        if cells[left] != cells[right] {
            return false;
        }
        left += 1;
        right -= 1;
    }
    true
}

/// Classify every row of `grid`. Total and side-effect free.
pub fn analyze(grid: &Grid) -> SymmetryReport {
    let findings: Vec<RowFinding> = grid
        .rows()
        .enumerate()
        .map(|(row, cells)| RowFinding { row, symmetric: is_row_symmetric(cells) })
        .collect();

    log::debug!(
        "analyzed {}x{} grid: {} symmetric row(s)",
        grid.size(),
        grid.size(),
        findings.iter().filter(|f| f.symmetric).count()
    );

    SymmetryReport { findings }
}
