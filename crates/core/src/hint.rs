//! Move search.
//!
//! Tries every swap with the right and lower neighbour, row-major, and returns
//! the first that produces a match. The board is left as it was.

use arrayvec::ArrayVec;

use crate::grid::Grid;
use crate::matcher::has_match;
use crate::types::Coord;

/// First swap that would produce a match, if any.
pub fn find_hint(grid: &Grid) -> Option<(Coord, Coord)> {
    let mut trial = grid.clone();
    for a in grid.coords() {
        if trial.is_empty(a) {
            continue;
        }
        for b in forward_neighbours(a, grid.size()) {
            if trial.is_empty(b) {
                continue;
            }
            trial.swap(a, b);
            let hit = has_match(&trial);
            trial.swap(a, b);
            if hit {
                return Some((a, b));
            }
        }
    }
    None
}

/// True if at least one swap would produce a match.
pub fn has_possible_move(grid: &Grid) -> bool {
    find_hint(grid).is_some()
}

fn forward_neighbours(at: Coord, size: usize) -> ArrayVec<Coord, 2> {
    let mut out = ArrayVec::new();
    if at.col + 1 < size {
        out.push(Coord::new(at.row, at.col + 1));
    }
    if at.row + 1 < size {
        out.push(Coord::new(at.row + 1, at.col));
    }
    out
}
