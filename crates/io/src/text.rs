// Matrix text export

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use symgrid_engine::Grid;

use crate::error::LoadError;

/// Render a grid in the loader's text format: the size on its own line,
/// then one space-separated row per line.
///
/// Numbers use Rust's shortest round-trip formatting, so the output parses
/// back to an identical grid.
pub fn to_text(grid: &Grid) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", grid.size());
    for row in grid.rows() {
        let line: Vec<String> = row.iter().map(|v| v.to_string()).collect();
        let _ = writeln!(out, "{}", line.join(" "));
    }
    out
}

pub fn export(grid: &Grid, path: &Path) -> Result<(), LoadError> {
    fs::write(path, to_text(grid)).map_err(|e| LoadError::ResourceUnavailable {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}
