// JSON grid import/export

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use serde::Deserialize;
use serde_json::{Number, Value};
use symgrid_engine::Grid;

use crate::error::LoadError;
use crate::loader::parse_size;

/// Accepted JSON shapes: `{"size": n, "rows": [[...]]}` or a bare `[[...]]`.
#[derive(Deserialize)]
#[serde(untagged)]
enum JsonGrid {
    // Bare must come first: an untagged struct variant also accepts a sequence
    Bare(Vec<Value>),
    Object { size: Option<Value>, rows: Vec<Value> },
}

/// Parse a JSON grid, classifying problems the same way as the text loader.
pub fn from_json(text: &str) -> Result<Grid, LoadError> {
    let doc: JsonGrid =
        serde_json::from_str(text).map_err(|e| LoadError::InvalidJson(e.to_string()))?;

    let (declared, rows) = match doc {
        JsonGrid::Object { size, rows } => (size, rows),
        JsonGrid::Bare(rows) => (None, rows),
    };

    let size = match declared {
        Some(Value::Number(n)) => declared_size(&n)?,
        Some(other) => return Err(LoadError::InvalidSize { token: other.to_string() }),
        None if rows.is_empty() => return Err(LoadError::MissingSize),
        None => parse_size(&rows.len().to_string())?,
    };

    if rows.len() < size {
        return Err(LoadError::IncompleteMatrix { expected: size, found: rows.len() });
    }
    if rows.len() > size {
        return Err(LoadError::TrailingData);
    }

    let mut cells = Vec::with_capacity(size);
    for (row, value) in rows.iter().enumerate() {
        let items = value
            .as_array()
            .ok_or_else(|| LoadError::InvalidJson(format!("row {} is not an array", row + 1)))?;
        if items.len() != size {
            return Err(LoadError::MalformedRow { row, expected: size, found: items.len() });
        }
        let parsed = items
            .iter()
            .enumerate()
            .map(|(col, item)| {
                item.as_f64().ok_or_else(|| LoadError::InvalidCell {
                    row,
                    col,
                    token: item.to_string(),
                })
            })
            .collect::<Result<Vec<f64>, LoadError>>()?;
        cells.push(parsed);
    }

    let grid = Grid::from_rows(cells)?;
    log::debug!("parsed {size}x{size} matrix from JSON");
    Ok(grid)
}

/// Integral floats such as `1e1` or `3.0` are accepted as sizes.
fn declared_size(n: &Number) -> Result<usize, LoadError> {
    if let Some(i) = n.as_i64() {
        return parse_size(&i.to_string());
    }
    match n.as_f64() {
        Some(f) if f.is_finite() && f.fract() == 0.0 => parse_size(&format!("{f:.0}")),
        _ => Err(LoadError::InvalidSize { token: n.to_string() }),
    }
}

pub fn to_json(grid: &Grid) -> Result<String, LoadError> {
    serde_json::to_string_pretty(grid).map_err(|e| LoadError::InvalidJson(e.to_string()))
}

/// Export grid as `{"size": n, "rows": [[...]]}`.
pub fn export(grid: &Grid, path: &Path) -> Result<(), LoadError> {
    let unavailable = |reason: String| LoadError::ResourceUnavailable {
        path: path.to_path_buf(),
        reason,
    };
    let file = File::create(path).map_err(|e| unavailable(e.to_string()))?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, grid).map_err(|e| unavailable(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn object_and_bare_forms() {
        let a = from_json(r#"{"size": 2, "rows": [[1, 2], [2, 1]]}"#).unwrap();
        let b = from_json("[[1, 2], [2, 1]]").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.get(0, 1), Some(2.0));
    }

    #[test]
    fn size_is_optional_in_object_form() {
        let grid = from_json(r#"{"rows": [[3.5]]}"#).unwrap();
        assert_eq!(grid.size(), 1);
    }

    #[test]
    fn integral_float_sizes() {
        let grid = from_json(r#"{"size": 2.0, "rows": [[1, 2], [2, 1]]}"#).unwrap();
        assert_eq!(grid.size(), 2);

        let rows = serde_json::to_string(&vec![vec![0; 10]; 10]).unwrap();
        let grid = from_json(&format!(r#"{{"size": 1e1, "rows": {rows}}}"#)).unwrap();
        assert_eq!(grid.size(), 10);

        assert_eq!(
            from_json(r#"{"size": 3e1, "rows": []}"#),
            Err(LoadError::OutOfRangeSize { size: 30 })
        );
        assert_eq!(
            from_json(r#"{"size": 1e30, "rows": []}"#),
            Err(LoadError::OutOfRangeSize { size: i64::MAX })
        );
    }

    #[test]
    fn classified_errors() {
        assert_eq!(
            from_json(r#"{"size": 21, "rows": []}"#),
            Err(LoadError::OutOfRangeSize { size: 21 })
        );
        assert_eq!(
            from_json(r#"{"size": 2, "rows": [[1, 2]]}"#),
            Err(LoadError::IncompleteMatrix { expected: 2, found: 1 })
        );
        assert_eq!(
            from_json("[[1, 2], [3]]"),
            Err(LoadError::MalformedRow { row: 1, expected: 2, found: 1 })
        );
        assert_eq!(
            from_json(r#"[[1, 2], [3, "x"]]"#),
            Err(LoadError::InvalidCell { row: 1, col: 1, token: "\"x\"".into() })
        );
        assert_eq!(from_json(r#"{"size": 1, "rows": [[1], [2]]}"#), Err(LoadError::TrailingData));
        assert_eq!(from_json("[]"), Err(LoadError::MissingSize));
        assert_eq!(
            from_json(r#"{"size": "two", "rows": [[1]]}"#),
            Err(LoadError::InvalidSize { token: "\"two\"".into() })
        );
        assert_eq!(
            from_json(r#"{"size": 2.5, "rows": [[1]]}"#),
            Err(LoadError::InvalidSize { token: "2.5".into() })
        );
        assert!(matches!(from_json("{not json"), Err(LoadError::InvalidJson(_))));
        assert!(matches!(from_json("[1, 2]"), Err(LoadError::InvalidJson(_))));
    }

    #[test]
    fn export_then_import() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("grid.json");

        let mut grid = Grid::new(3).unwrap();
        grid.set(0, 0, 1.25).unwrap();
        grid.set(2, 2, -7.0).unwrap();
        export(&grid, &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let doc: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(doc["size"], 3);
        assert_eq!(doc["rows"][2][2], -7.0);

        assert_eq!(from_json(&content).unwrap(), grid);
    }
}
