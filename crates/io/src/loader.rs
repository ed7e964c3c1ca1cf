// Matrix text format
//
//   <size>
//   <v11> <v12> ... <v1n>
//   ...
//   <vn1> <vn2> ... <vnn>
//
// The first whitespace-delimited token anywhere in the input is the size.
// Values are anything `f64::from_str` accepts that is also finite.

use std::num::IntErrorKind;

use symgrid_engine::{Grid, GridError, MAX_SIZE, MIN_SIZE};

use crate::error::LoadError;

/// How cells after the size token are grouped into rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    /// One physical line per row. Row token counts are checked line by line.
    #[default]
    Rows,
    /// Cells are the next `size * size` tokens, regardless of line breaks.
    Tokens,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LoadOptions {
    pub layout: Layout,
}

impl LoadOptions {
    pub fn with_layout(layout: Layout) -> Self {
        Self { layout }
    }
}

/// Parse matrix text using the default row-per-line layout.
pub fn parse(text: &str) -> Result<Grid, LoadError> {
    parse_with(text, &LoadOptions::default())
}

pub fn parse_with(text: &str, options: &LoadOptions) -> Result<Grid, LoadError> {
    let (size, rest) = split_size(text)?;

    let rows = match options.layout {
        Layout::Rows => read_rows(rest, size)?,
        Layout::Tokens => read_tokens(rest, size)?,
    };

    let grid = Grid::from_rows(rows)?;
    log::debug!("parsed {size}x{size} matrix ({:?} layout)", options.layout);
    Ok(grid)
}

/// Validate a declared size token.
pub fn parse_size(token: &str) -> Result<usize, LoadError> {
    match token.parse::<i64>() {
        Ok(n) if n >= MIN_SIZE as i64 && n <= MAX_SIZE as i64 => Ok(n as usize),
        Ok(n) => Err(LoadError::OutOfRangeSize { size: n }),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => Err(LoadError::OutOfRangeSize { size: i64::MAX }),
            IntErrorKind::NegOverflow => Err(LoadError::OutOfRangeSize { size: i64::MIN }),
            _ => Err(LoadError::InvalidSize { token: token.to_string() }),
        },
    }
}

/// Find the first token, validate it as the size, and return the text after it.
fn split_size(text: &str) -> Result<(usize, &str), LoadError> {
    let start = text
        .find(|c: char| !c.is_whitespace())
        .ok_or(LoadError::MissingSize)?;
    let tail = &text[start..];
    let end = tail.find(char::is_whitespace).unwrap_or(tail.len());

    let size = parse_size(&tail[..end])?;
    Ok((size, &tail[end..]))
}

fn read_rows(rest: &str, size: usize) -> Result<Vec<Vec<f64>>, LoadError> {
    let mut lines = rest.lines();

    // Remainder of the size line
    if let Some(extra) = lines.next() {
        if !extra.trim().is_empty() {
            log::warn!("ignoring data after matrix size on first line: '{}'", extra.trim());
        }
    }

    let mut rows = Vec::with_capacity(size);
    for row in 0..size {
        let line = lines
            .next()
            .ok_or(LoadError::IncompleteMatrix { expected: size, found: row })?;

        let tokens: Vec<&str> = line.split_whitespace().collect();
        // Only blank lines left: the input ran out of rows
        if tokens.is_empty() && lines.clone().all(|l| l.trim().is_empty()) {
            return Err(LoadError::IncompleteMatrix { expected: size, found: row });
        }
        if tokens.len() != size {
            return Err(LoadError::MalformedRow { row, expected: size, found: tokens.len() });
        }

        let cells = tokens
            .iter()
            .enumerate()
            .map(|(col, token)| parse_cell(token, row, col))
            .collect::<Result<Vec<f64>, LoadError>>()?;
        rows.push(cells);
    }

    if lines.any(|line| !line.trim().is_empty()) {
        return Err(LoadError::TrailingData);
    }

    Ok(rows)
}

fn read_tokens(rest: &str, size: usize) -> Result<Vec<Vec<f64>>, LoadError> {
    let mut tokens = rest.split_whitespace();
    let mut rows = Vec::with_capacity(size);

    for row in 0..size {
        let mut cells = Vec::with_capacity(size);
        for col in 0..size {
            let token = tokens
                .next()
                .ok_or(LoadError::IncompleteMatrix { expected: size, found: row })?;
            cells.push(parse_cell(token, row, col)?);
        }
        rows.push(cells);
    }

    if tokens.next().is_some() {
        return Err(LoadError::TrailingData);
    }

    Ok(rows)
}

pub(crate) fn parse_cell(token: &str, row: usize, col: usize) -> Result<f64, LoadError> {
    token
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| LoadError::InvalidCell { row, col, token: token.to_string() })
}

impl From<GridError> for LoadError {
    fn from(err: GridError) -> Self {
        match err {
            GridError::SizeOutOfRange { size } => LoadError::OutOfRangeSize {
                size: i64::try_from(size).unwrap_or(i64::MAX),
            },
            GridError::RaggedRow { row, len, size } => {
                LoadError::MalformedRow { row, expected: size, found: len }
            }
            GridError::NonFinite { row, col } => {
                LoadError::InvalidCell { row, col, token: "non-finite".to_string() }
            }
            GridError::CellOutOfBounds { row, col, size } => {
                LoadError::MalformedRow { row, expected: size, found: col + 1 }
            }
        }
    }
}
