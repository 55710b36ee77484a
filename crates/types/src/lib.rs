//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! Everything here is plain data: the rules live in `candy-swap-core`, and hosts
//! (terminal view, pacing driver) only ever read these types.
//!
//! # Board
//!
//! The board is a square grid addressed by [`Coord`] (`row` 0 is the top row,
//! `col` 0 the leftmost column). Each position holds a [`Cell`], which is either
//! empty (only transiently, while a cascade is running) or a [`Candy`].
//!
//! # Scoring constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `MATCH_BASE_SCORE` | 100 | Base of the `100 * k * k` match formula |
//! | `AREA_CLEAR_POINTS` | 50 | Per cell emptied by an area clear |
//! | `LINE_CLEAR_POINTS` | 30 | Per cell emptied by a line clear |
//!
//! # Presentation timing
//!
//! The rules never wait. These delays are what a paced host inserts between
//! cascade steps so animations can play:
//!
//! | Constant | Value |
//! |----------|-------|
//! | `SWAP_ANIM_MS` | 300 |
//! | `CLEAR_ANIM_MS` | 400 |
//! | `DETONATE_STAGGER_MS` | 300 |
//! | `DROP_ANIM_MS` | 500 |
//!
//! # Examples
//!
//! ```
//! use candy_swap_types::{Coord, LevelConfig, Palette, TokenType};
//!
//! let a = Coord::new(3, 2);
//! assert!(a.is_adjacent(Coord::new(3, 3)));
//! assert!(!a.is_adjacent(Coord::new(4, 3)));
//!
//! let palette = Palette::first(5);
//! assert_eq!(palette.len(), 5);
//! assert_eq!(TokenType(0).name(), "apple");
//!
//! let level = LevelConfig::builtin(1).unwrap();
//! assert_eq!(level.goal, 1000);
//! assert_eq!(level.mission(), "Score 1000 points in 25 moves!");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Default board edge length (8x8)
pub const DEFAULT_BOARD_SIZE: usize = 8;

/// Smallest board that can hold a run
pub const MIN_BOARD_SIZE: usize = 3;

/// Largest accepted board edge length
pub const MAX_BOARD_SIZE: usize = 32;

/// Minimum run length that counts as a match
pub const MIN_RUN: usize = 3;

/// Base points for the match formula `MATCH_BASE_SCORE * k * k`, `k = matched / 3`
pub const MATCH_BASE_SCORE: u32 = 100;

/// Points per cell emptied by an area clear
pub const AREA_CLEAR_POINTS: u32 = 50;

/// Points per cell emptied by a line clear
pub const LINE_CLEAR_POINTS: u32 = 30;

/// Upper bound on detect/clear/refill cycles within one cascade
pub const MAX_CASCADE_CYCLES: u32 = 256;

/// Swap animation before the cascade starts (ms)
pub const SWAP_ANIM_MS: u32 = 300;

/// Matched cells fade out before they are removed (ms)
pub const CLEAR_ANIM_MS: u32 = 400;

/// Delay between consecutive special detonations (ms)
pub const DETONATE_STAGGER_MS: u32 = 300;

/// Falling/refill animation (ms)
pub const DROP_ANIM_MS: u32 = 500;

/// Host frame tick (ms), approximately 60 FPS
pub const TICK_MS: u32 = 16;

/// Candy names, indexed by [`TokenType`].
pub const CANDY_NAMES: [&str; 8] = [
    "apple",
    "orange",
    "lemon",
    "grape",
    "watermelon",
    "strawberry",
    "cherry",
    "peach",
];

/// A grid position. Row 0 is the top row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// True when `other` is exactly one step away on exactly one axis.
    pub fn is_adjacent(self, other: Coord) -> bool {
        let dr = self.row.abs_diff(other.row);
        let dc = self.col.abs_diff(other.col);
        (dr == 1 && dc == 0) || (dr == 0 && dc == 1)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A token kind. Only compared for equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenType(pub u8);

impl TokenType {
    /// Candy name for display purposes ("token" past the built-in eight).
    pub fn name(self) -> &'static str {
        CANDY_NAMES.get(self.0 as usize).copied().unwrap_or("token")
    }
}

/// The set of token types a level draws from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette(Vec<TokenType>);

impl Palette {
    pub fn new(tokens: Vec<TokenType>) -> Self {
        Self(tokens)
    }

    /// The first `n` candies (capped at the eight named ones).
    pub fn first(n: usize) -> Self {
        let n = n.min(CANDY_NAMES.len());
        Self((0..n as u8).map(TokenType).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<TokenType> {
        self.0.get(index).copied()
    }

    pub fn tokens(&self) -> &[TokenType] {
        &self.0
    }

    /// Number of distinct token types (duplicates in the list collapse).
    pub fn distinct_count(&self) -> usize {
        let mut seen: Vec<TokenType> = Vec::with_capacity(self.0.len());
        for &t in &self.0 {
            if !seen.contains(&t) {
                seen.push(t);
            }
        }
        seen.len()
    }
}

/// Orientation of a line clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Special marker carried by a candy created from a long match.
///
/// - **AreaClear**: empties the 3x3 neighbourhood around itself
/// - **LineClear**: empties its whole row (horizontal) or column (vertical)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecialKind {
    AreaClear,
    LineClear(Axis),
}

impl SpecialKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpecialKind::AreaClear => "area_clear",
            SpecialKind::LineClear(Axis::Horizontal) => "line_clear_horizontal",
            SpecialKind::LineClear(Axis::Vertical) => "line_clear_vertical",
        }
    }

    /// The clear cause reported when this special detonates.
    pub fn clear_cause(&self) -> ClearCause {
        match self {
            SpecialKind::AreaClear => ClearCause::AreaClear,
            SpecialKind::LineClear(_) => ClearCause::LineClear,
        }
    }
}

/// A candy occupying a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Candy {
    pub token: TokenType,
    pub special: Option<SpecialKind>,
}

impl Candy {
    pub const fn plain(token: TokenType) -> Self {
        Self {
            token,
            special: None,
        }
    }

    pub const fn special(token: TokenType, kind: SpecialKind) -> Self {
        Self {
            token,
            special: Some(kind),
        }
    }
}

/// A cell on the board
///
/// - `None`: empty (only between a clear and the following refill)
/// - `Some(Candy)`: occupied
pub type Cell = Option<Candy>;

/// Turn controller phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Waiting for the first tile of a swap
    #[default]
    Idle,
    /// One tile selected, waiting for the second
    SwapPending,
    /// A cascade is running; swaps are refused
    CascadeResolving,
    /// Goal reached (terminal)
    Won,
    /// Moves exhausted below the goal (terminal)
    Lost,
}

impl Phase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Won | Phase::Lost)
    }

    /// Whether a new tile selection or swap request may be processed.
    pub fn accepts_swaps(&self) -> bool {
        matches!(self, Phase::Idle | Phase::SwapPending)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::SwapPending => "swap_pending",
            Phase::CascadeResolving => "cascade_resolving",
            Phase::Won => "won",
            Phase::Lost => "lost",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a set of cells was emptied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClearCause {
    Match,
    AreaClear,
    LineClear,
}

/// Why a level attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnEndReason {
    MovesExhausted,
    GoalReached,
}

/// Immutable copy of the board for observers.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub size: usize,
    /// Row-major cells, `size * size` long.
    pub cells: Vec<Cell>,
}

impl BoardSnapshot {
    pub fn get(&self, coord: Coord) -> Option<Cell> {
        if coord.row >= self.size || coord.col >= self.size {
            return None;
        }
        self.cells.get(coord.row * self.size + coord.col).copied()
    }
}

/// Core-side events consumed by rendering/audio collaborators.
///
/// Events are appended in the exact order the board and score change, so a host
/// replaying them sees every intermediate state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    BoardInitialized {
        board: BoardSnapshot,
    },
    SwapAttempted {
        a: Coord,
        b: Coord,
        accepted: bool,
    },
    CellsCleared {
        cells: Vec<Coord>,
        cause: ClearCause,
    },
    SpecialCreated {
        at: Coord,
        kind: SpecialKind,
    },
    TilesDropped {
        column: usize,
        from_row: usize,
        to_row: usize,
    },
    TilesRefilled {
        column: usize,
        cells: Vec<Coord>,
        tokens: Vec<TokenType>,
    },
    ScoreChanged {
        delta: u32,
        total: u32,
    },
    TurnEnded {
        reason: TurnEndReason,
        score: u32,
        moves_remaining: u32,
    },
}

/// Parameters of one level attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelConfig {
    pub level: u32,
    pub size: usize,
    pub palette: Palette,
    pub goal: u32,
    pub moves: u32,
}

/// Built-in levels: (level, moves, goal, candy count).
pub const LEVELS: [(u32, u32, u32, usize); 3] = [
    (1, 25, 1000, 5),
    (2, 20, 1500, 6),
    (3, 15, 2000, 7),
];

impl LevelConfig {
    /// Look up a built-in level (1-based). Returns `None` past the last level.
    pub fn builtin(level: u32) -> Option<Self> {
        LEVELS
            .iter()
            .find(|(n, ..)| *n == level)
            .map(|&(level, moves, goal, candies)| Self {
                level,
                size: DEFAULT_BOARD_SIZE,
                palette: Palette::first(candies),
                goal,
                moves,
            })
    }

    /// Number of built-in levels.
    pub fn builtin_count() -> u32 {
        LEVELS.len() as u32
    }

    pub fn mission(&self) -> String {
        format!("Score {} points in {} moves!", self.goal, self.moves)
    }
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            level: 1,
            size: DEFAULT_BOARD_SIZE,
            palette: Palette::first(5),
            goal: 1000,
            moves: 25,
        }
    }
}
