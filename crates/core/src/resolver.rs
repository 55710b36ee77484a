//! Special-token resolver.
//!
//! Matched cells are grouped by token type (groups in order of first
//! appearance, cells in match discovery order) and each group is classified by
//! its size alone:
//!
//! | Group size | Result |
//! |------------|--------|
//! | 3 | nothing |
//! | 4 | `LineClear` on the first cell; horizontal if the first two cells share a row |
//! | 5+ | `AreaClear` on the cell at index `len / 2` |
//!
//! Grouping is per type across the whole pass, so two unrelated runs of the
//! same type found in one cycle are classified as one group.

use crate::grid::Grid;
use crate::matcher::MatchSet;
use crate::types::{Axis, Coord, SpecialKind, TokenType};

/// A special marker to place on a matched cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecialPlacement {
    pub at: Coord,
    pub token: TokenType,
    pub kind: SpecialKind,
}

/// Classify matched groups into special placements.
pub fn resolve_specials(grid: &Grid, matches: &MatchSet) -> Vec<SpecialPlacement> {
    let mut groups: Vec<(TokenType, Vec<Coord>)> = Vec::new();
    for &coord in matches.cells() {
        let Some(token) = grid.token(coord) else {
            continue;
        };
        match groups.iter_mut().find(|(t, _)| *t == token) {
            Some((_, cells)) => cells.push(coord),
            None => groups.push((token, vec![coord])),
        }
    }

    groups
        .into_iter()
        .filter_map(|(token, cells)| classify(token, &cells))
        .collect()
}

fn classify(token: TokenType, cells: &[Coord]) -> Option<SpecialPlacement> {
    match cells.len() {
        n if n >= 5 => Some(SpecialPlacement {
            at: cells[n / 2],
            token,
            kind: SpecialKind::AreaClear,
        }),
        4 => {
            let axis = if cells[0].row == cells[1].row {
                Axis::Horizontal
            } else {
                Axis::Vertical
            };
            Some(SpecialPlacement {
                at: cells[0],
                token,
                kind: SpecialKind::LineClear(axis),
            })
        }
        _ => None,
    }
}
