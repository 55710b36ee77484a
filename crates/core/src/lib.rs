//! Core rules engine - pure, deterministic, and testable
//!
//! This crate contains the match-3 rules: board generation, match detection,
//! special tokens, scoring, the cascade step machine and the turn controller.
//! It has **no dependencies** on terminals, timers, or I/O, which makes it:
//!
//! - **Deterministic**: same seed and same inputs produce the same game
//! - **Testable**: every stage of a cascade can be stepped and inspected
//! - **Portable**: runs under the terminal host, headless, or in a benchmark
//!
//! # Module Structure
//!
//! - [`grid`]: square board of cells, match-free generation
//! - [`matcher`]: row and column run detection
//! - [`resolver`]: special-token classification of matched groups
//! - [`scoring`]: match and detonation points
//! - [`cascade`]: detect/clear/gravity/refill step machine
//! - [`session`]: turn controller, level lifecycle and event log
//! - [`hint`]: search for a swap that produces a match
//! - [`rng`]: token sources (seeded LCG, scripted sequence)
//!
//! # Game Rules
//!
//! - **Swaps**: two orthogonally adjacent tiles; kept only if a match forms
//! - **Matches**: three or more equal tokens in a row or column
//! - **Specials**: a group of four makes a line clear, five or more an area clear
//! - **Scoring**: `100 * k * k` per detection pass (`k = matched / 3`), 50 per
//!   cell for an area clear, 30 per cell for a line clear
//! - **Turns**: one move per accepted swap; reach the goal to win, run out of
//!   moves below it to lose
//!
//! # Example
//!
//! ```
//! use candy_swap_core::{GameSession, SwapOutcome};
//! use candy_swap_core::types::{LevelConfig, Phase};
//!
//! let mut game = GameSession::with_seed(LevelConfig::default(), 12345).unwrap();
//! assert_eq!(game.phase(), Phase::Idle);
//!
//! if let Some((a, b)) = game.hint() {
//!     assert_eq!(game.request_swap(a, b).unwrap(), SwapOutcome::Accepted);
//!     game.resolve_turn().unwrap();
//!     assert!(game.score() >= 100);
//!     assert_eq!(game.moves_remaining(), 24);
//! }
//! ```

pub mod cascade;
pub mod error;
pub mod grid;
pub mod hint;
pub mod matcher;
pub mod resolver;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snapshot;

pub use candy_swap_types as types;

// Re-export commonly used types for convenience
pub use cascade::{apply_gravity, refill, Cascade, CascadeContext, CascadeReport, CascadeStage};
pub use error::{GameError, InvariantViolation, Rejection};
pub use grid::Grid;
pub use hint::{find_hint, has_possible_move};
pub use matcher::{find_matches, has_match, MatchSet, Run};
pub use resolver::{resolve_specials, SpecialPlacement};
pub use rng::{SequenceRng, SimpleRng, TokenRng};
pub use scoring::{detonation_score, match_score};
pub use session::{GameSession, Progress, Selection, SwapOutcome, TurnState};
pub use snapshot::GameSnapshot;
