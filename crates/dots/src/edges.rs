//! Parser for the edge list text area.
//!
//! Each non-empty line reads `COL,ROW COL,ROW COLOR`, for example
//! `0,0 2,1 red`. A line with the wrong number of fields is reported and
//! skipped. A coordinate outside the grid, or one that is not a number, stops
//! the pass: nothing from the edge layer is drawn until it is fixed.

use std::fmt;

/// One colored segment between two grid coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeRecord {
    pub start_col: usize,
    pub start_row: usize,
    pub end_col: usize,
    pub end_row: usize,
    /// Color exactly as typed; resolved when drawing.
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EdgeError {
    /// The line did not split into three space-separated fields.
    MissingField { line: usize },
    /// A coordinate token is not `COL,ROW` with non-negative integers.
    BadCoordinate { line: usize, token: String },
    /// A coordinate lies outside the grid; `min_size` would fit it.
    OutOfRange { line: usize, min_size: usize },
}

impl EdgeError {
    /// Whether this error discards the whole edge layer.
    pub fn aborts_pass(&self) -> bool {
        !matches!(self, Self::MissingField { .. })
    }
}

impl fmt::Display for EdgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField { line } => write!(
                f,
                "Line {line}: missing a portion of the line, or missing a space."
            ),
            Self::BadCoordinate { line, token } => write!(
                f,
                "Line {line}: \"{token}\" is not a grid coordinate, cannot draw edges."
            ),
            Self::OutOfRange { min_size, .. } => write!(
                f,
                "Cannot draw edges, grid must be at least size {min_size}."
            ),
        }
    }
}

impl std::error::Error for EdgeError {}

/// Result of parsing a whole edge list against a grid size.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedEdges {
    /// Valid records in input order, up to the line that aborted the pass.
    pub edges: Vec<EdgeRecord>,
    /// Every problem found, in input order. An aborting error is always last.
    pub errors: Vec<EdgeError>,
}

impl ParsedEdges {
    pub fn aborted(&self) -> bool {
        self.errors.last().is_some_and(EdgeError::aborts_pass)
    }

    /// Edges to draw this pass: all of them, or none if the pass aborted.
    pub fn drawable(&self) -> &[EdgeRecord] {
        if self.aborted() { &[] } else { &self.edges }
    }

    pub fn messages(&self) -> impl Iterator<Item = String> + '_ {
        self.errors.iter().map(ToString::to_string)
    }
}

/// Parse `text` for a grid with `grid_size` dots per side.
pub fn parse(text: &str, grid_size: usize) -> ParsedEdges {
    let mut parsed = ParsedEdges::default();
    let lines = text.lines().filter(|l| !l.is_empty());

    for (idx, raw) in lines.enumerate() {
        let line = idx + 1;
        match parse_line(raw, line, grid_size) {
            Ok(edge) => parsed.edges.push(edge),
            Err(err) => {
                let stop = err.aborts_pass();
                parsed.errors.push(err);
                if stop {
                    break;
                }
            }
        }
    }

    parsed
}

fn parse_line(raw: &str, line: usize, grid_size: usize) -> Result<EdgeRecord, EdgeError> {
    let fields: Vec<&str> = raw.split(' ').collect();
    let [origin, dest, color] = fields.as_slice() else {
        return Err(EdgeError::MissingField { line });
    };

    let (start_col, start_row) = parse_coordinate(origin, line)?;
    let (end_col, end_row) = parse_coordinate(dest, line)?;

    let highest = start_col.max(end_col).max(start_row).max(end_row);
    if highest >= grid_size {
        return Err(EdgeError::OutOfRange {
            line,
            min_size: highest + 1,
        });
    }

    Ok(EdgeRecord {
        start_col,
        start_row,
        end_col,
        end_row,
        color: (*color).to_string(),
    })
}

fn parse_coordinate(token: &str, line: usize) -> Result<(usize, usize), EdgeError> {
    let bad = || EdgeError::BadCoordinate {
        line,
        token: token.to_string(),
    };
    let (col, row) = token.split_once(',').ok_or_else(bad)?;
    let col = col.parse::<usize>().map_err(|_| bad())?;
    let row = row.parse::<usize>().map_err(|_| bad())?;
    Ok((col, row))
}
