// Report rendering for `symgrid check`

use serde::Serialize;
use symgrid_engine::{Grid, SymmetryReport};

#[derive(Debug, Serialize)]
pub struct RowOutput {
    /// 1-based row number
    pub row: usize,
    pub symmetric: bool,
}

/// JSON shape of a symmetry report. Row numbers are 1-based.
#[derive(Debug, Serialize)]
pub struct ReportOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub size: usize,
    pub any_symmetric: bool,
    pub symmetric_rows: Vec<usize>,
    pub rows: Vec<RowOutput>,
}

impl ReportOutput {
    pub fn new(source: Option<String>, grid: &Grid, report: &SymmetryReport) -> Self {
        Self {
            source,
            size: grid.size(),
            any_symmetric: report.any_symmetric(),
            symmetric_rows: report.symmetric_rows().map(|r| r + 1).collect(),
            rows: report
                .findings()
                .iter()
                .map(|f| RowOutput { row: f.row + 1, symmetric: f.symmetric })
                .collect(),
        }
    }
}
