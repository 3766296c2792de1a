//! Grid text format load/save. An external collaborator per spec.md: it
//! depends only on `Grid` and is never depended on by the core solvers,
//! constraints, generator, or validator.
//!
//! ```text
//! <size>
//! <row0 tokens separated by spaces>
//! ...
//! <rowN-1 tokens separated by spaces>
//! ```
//!
//! Each token is `.` (empty), `0`, or `1`. Blank lines and `#`-prefixed
//! comment lines before the size header are skipped.

use std::fmt;

use crate::cell::Cell;
use crate::grid::Grid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    MissingSizeHeader,
    InvalidSizeHeader(String),
    InvalidSize(usize),
    MissingRow { row: usize },
    WrongTokenCount { row: usize, expected: usize, found: usize },
    UnknownToken { row: usize, col: usize, token: String },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::MissingSizeHeader => write!(f, "missing size header"),
            LoadError::InvalidSizeHeader(raw) => write!(f, "invalid size header {raw:?}: not an integer"),
            LoadError::InvalidSize(size) => {
                write!(f, "invalid grid size {size}: must be even and at least 4")
            }
            LoadError::MissingRow { row } => write!(f, "missing row {row}"),
            LoadError::WrongTokenCount { row, expected, found } => write!(
                f,
                "row {row} has {found} tokens, expected {expected}"
            ),
            LoadError::UnknownToken { row, col, token } => {
                write!(f, "unknown token {token:?} at row {row}, col {col}")
            }
        }
    }
}

impl std::error::Error for LoadError {}

/// Strips `#`-comment and blank lines that may precede the size header.
fn significant_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines()
        .map(str::trim_end)
        .filter(|line| !line.trim().is_empty() && !line.trim_start().starts_with('#'))
}

pub fn load(text: &str) -> Result<Grid, LoadError> {
    let mut lines = significant_lines(text);

    let size_line = lines.next().ok_or(LoadError::MissingSizeHeader)?;
    let size: usize = size_line
        .trim()
        .parse()
        .map_err(|_| LoadError::InvalidSizeHeader(size_line.to_owned()))?;
    if size < 4 || size % 2 != 0 {
        return Err(LoadError::InvalidSize(size));
    }

    let mut grid = Grid::new_unchecked(size);
    for row in 0..size {
        let line = lines.next().ok_or(LoadError::MissingRow { row })?;
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() != size {
            return Err(LoadError::WrongTokenCount {
                row,
                expected: size,
                found: tokens.len(),
            });
        }
        for (col, token) in tokens.into_iter().enumerate() {
            let cell = match token {
                "." => Cell::Empty,
                "0" => Cell::Zero,
                "1" => Cell::One,
                other => {
                    return Err(LoadError::UnknownToken {
                        row,
                        col,
                        token: other.to_owned(),
                    })
                }
            };
            grid.set(row, col, cell);
        }
    }

    Ok(grid)
}

pub fn save(grid: &Grid) -> String {
    let mut out = String::new();
    out.push_str(&grid.size().to_string());
    out.push('\n');
    for r in 0..grid.size() {
        let row: Vec<String> = (0..grid.size()).map(|c| grid.get(r, c).to_string()).collect();
        out.push_str(&row.join(" "));
        out.push('\n');
    }
    out
}
