//! Error taxonomy.
//!
//! Two families with different consequences:
//! - [`Rejection`]: invalid input. State is left untouched and the session stays usable.
//! - [`InvariantViolation`]: a broken contract inside the rules. Fatal for the session.

use thiserror::Error;

use crate::types::{Coord, Phase};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("board size {size} is below the minimum of 3")]
    BoardTooSmall { size: usize },
    #[error("board size {size} exceeds the maximum of {max}")]
    BoardTooLarge { size: usize, max: usize },
    #[error("palette is empty")]
    EmptyPalette,
    #[error("palette needs at least two distinct token types")]
    PaletteTooSmall,
    #[error("goal must be greater than zero")]
    InvalidGoal,
    #[error("move budget must be greater than zero")]
    InvalidMoveBudget,
    #[error("coordinate {0} is outside the board")]
    OutOfBounds(Coord),
    #[error("{0} and {1} are not adjacent")]
    NotAdjacent(Coord, Coord),
    #[error("input is not accepted while {0}")]
    NotAccepting(Phase),
}

impl Rejection {
    pub fn code(self) -> &'static str {
        match self {
            Rejection::BoardTooSmall { .. }
            | Rejection::BoardTooLarge { .. }
            | Rejection::EmptyPalette
            | Rejection::PaletteTooSmall
            | Rejection::InvalidGoal
            | Rejection::InvalidMoveBudget => "invalid_level",
            Rejection::OutOfBounds(_) | Rejection::NotAdjacent(..) => "invalid_swap",
            Rejection::NotAccepting(_) => "busy",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("grid must be square and at least 3x3, got {rows} rows with row lengths {detail}")]
    GridShape { rows: usize, detail: String },
    #[error("cell {0} is empty while the board is at rest")]
    EmptyCellAtRest(Coord),
    #[error("cascade did not settle after {cycles} cycles")]
    CascadeDidNotSettle { cycles: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("rejected: {0}")]
    Rejected(#[from] Rejection),
    #[error("invariant violated: {0}")]
    Invariant(#[from] InvariantViolation),
}

impl GameError {
    pub fn is_fatal(&self) -> bool {
        matches!(self, GameError::Invariant(_))
    }

    pub fn code(&self) -> &'static str {
        match self {
            GameError::Rejected(r) => r.code(),
            GameError::Invariant(_) => "invariant_violation",
        }
    }

    /// The rejection, if this is a recoverable input error.
    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            GameError::Rejected(r) => Some(*r),
            GameError::Invariant(_) => None,
        }
    }
}
