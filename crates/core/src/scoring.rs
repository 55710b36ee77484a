//! Scoring module
//!
//! - Matches: `100 * k * k` with `k = matched / 3` (integer division), where
//!   `matched` is the deduplicated number of matched cells in one detection pass.
//! - Detonations: a flat amount per emptied cell, 50 for an area clear and 30
//!   for a line clear.

use crate::types::{SpecialKind, AREA_CLEAR_POINTS, LINE_CLEAR_POINTS, MATCH_BASE_SCORE};

/// Points for one detection pass.
pub fn match_score(matched: usize) -> u32 {
    let k = (matched / 3) as u32;
    MATCH_BASE_SCORE.saturating_mul(k).saturating_mul(k)
}

/// Points for a detonation that emptied `affected` cells.
pub fn detonation_score(kind: SpecialKind, affected: usize) -> u32 {
    let per_cell = match kind {
        SpecialKind::AreaClear => AREA_CLEAR_POINTS,
        SpecialKind::LineClear(_) => LINE_CLEAR_POINTS,
    };
    per_cell.saturating_mul(affected as u32)
}
