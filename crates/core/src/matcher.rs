//! Match detection.
//!
//! Scans rows left to right (row-major), then columns top to bottom
//! (column-major). A run of three or more equal, non-empty tokens is extended
//! greedily and scanning resumes right after it. The union of both passes is
//! deduplicated while keeping first-discovery order, which the special-token
//! resolver depends on.

use crate::grid::Grid;
use crate::types::{Axis, Coord, TokenType, MIN_RUN};

/// One maximal run found by a single axis pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub token: TokenType,
    pub start: Coord,
    pub axis: Axis,
    pub len: usize,
}

impl Run {
    /// Coordinates covered by the run, in scan order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> {
        let Run {
            start, axis, len, ..
        } = *self;
        (0..len).map(move |i| match axis {
            Axis::Horizontal => Coord::new(start.row, start.col + i),
            Axis::Vertical => Coord::new(start.row + i, start.col),
        })
    }
}

/// Deduplicated matched cells of one detection pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchSet {
    cells: Vec<Coord>,
    runs: Vec<Run>,
}

impl MatchSet {
    /// Matched coordinates, unique, in discovery order.
    pub fn cells(&self) -> &[Coord] {
        &self.cells
    }

    /// The raw runs, horizontal pass first.
    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, coord: Coord) -> bool {
        self.cells.contains(&coord)
    }
}

/// Find every run of three or more on the board.
pub fn find_matches(grid: &Grid) -> MatchSet {
    let size = grid.size();
    let mut runs = Vec::new();

    for row in 0..size {
        scan_line(grid, &mut runs, Axis::Horizontal, |i| Coord::new(row, i));
    }
    for col in 0..size {
        scan_line(grid, &mut runs, Axis::Vertical, |i| Coord::new(i, col));
    }

    let mut seen = vec![false; size * size];
    let mut cells = Vec::new();
    for run in &runs {
        for c in run.coords() {
            let idx = c.row * size + c.col;
            if !seen[idx] {
                seen[idx] = true;
                cells.push(c);
            }
        }
    }

    MatchSet { cells, runs }
}

/// True if the board has at least one run (cheaper than collecting them).
pub fn has_match(grid: &Grid) -> bool {
    let size = grid.size();
    (0..size).any(|r| line_has_run(grid, |i| Coord::new(r, i)))
        || (0..size).any(|c| line_has_run(grid, |i| Coord::new(i, c)))
}

fn line_has_run(grid: &Grid, at: impl Fn(usize) -> Coord) -> bool {
    let mut streak = 0usize;
    let mut prev: Option<TokenType> = None;
    for i in 0..grid.size() {
        let t = grid.token(at(i));
        if t.is_some() && t == prev {
            streak += 1;
        } else {
            streak = 1;
        }
        prev = t;
        if t.is_some() && streak >= MIN_RUN {
            return true;
        }
    }
    false
}

fn scan_line(grid: &Grid, runs: &mut Vec<Run>, axis: Axis, at: impl Fn(usize) -> Coord) {
    let size = grid.size();
    let mut i = 0;
    while i + MIN_RUN <= size {
        let Some(token) = grid.token(at(i)) else {
            i += 1;
            continue;
        };
        let mut len = 1;
        while i + len < size && grid.token(at(i + len)) == Some(token) {
            len += 1;
        }
        if len >= MIN_RUN {
            runs.push(Run {
                token,
                start: at(i),
                axis,
                len,
            });
            i += len;
        } else {
            i += 1;
        }
    }
}
