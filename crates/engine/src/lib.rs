//! `symgrid-engine`: square numeric grids and row symmetry analysis.
//!
//! Pure engine crate: no IO. Grids come in already validated, reports go out.

pub mod grid;
pub mod symmetry;

pub use grid::{Grid, GridError, MAX_SIZE, MIN_SIZE};
pub use symmetry::{analyze, is_row_symmetric, RowFinding, SymmetryReport};
