//! Game session - the turn controller
//!
//! A [`GameSession`] owns the board, the turn accounting, the token source and
//! the event log of one player. Input only enters through [`GameSession::select`]
//! and [`GameSession::request_swap`], and both are refused outside `Idle` and
//! `SwapPending`. An accepted swap starts a [`Cascade`], which the host advances
//! with [`GameSession::step`] (paced) or [`GameSession::resolve_turn`] (at once).
//!
//! ```text
//! Idle --select--> SwapPending --adjacent select--> swap attempt
//!   ^                  |  same tile: cancel          | no match: revert -> Idle
//!   |                  |  far tile: reselect         | match
//!   |                                                v
//!   +---- moves left, below goal ---- CascadeResolving --stable--> Won | Lost
//! ```
//!
//! A violated invariant faults the session: the violation is logged, returned,
//! and returned again from every later call.

use tracing::{debug, instrument, warn};

use crate::cascade::{Cascade, CascadeContext, CascadeStage};
use crate::error::{GameError, InvariantViolation, Rejection};
use crate::grid::{validate_level_shape, Grid};
use crate::hint::find_hint;
use crate::matcher::has_match;
use crate::rng::{SimpleRng, TokenRng};
use crate::snapshot::GameSnapshot;
use crate::types::{Coord, GameEvent, LevelConfig, Palette, Phase, TurnEndReason};

/// Score and move accounting for the level being played.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnState {
    score: u32,
    moves_remaining: u32,
    goal: u32,
    phase: Phase,
}

impl TurnState {
    fn new(goal: u32, moves: u32) -> Self {
        Self {
            score: 0,
            moves_remaining: moves,
            goal,
            phase: Phase::Idle,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn moves_remaining(&self) -> u32 {
        self.moves_remaining
    }

    pub fn goal(&self) -> u32 {
        self.goal
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn goal_reached(&self) -> bool {
        self.score >= self.goal
    }
}

/// Result of a swap that passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapOutcome {
    /// A match formed; a cascade is now resolving.
    Accepted,
    /// No match; the tiles were put back and no move was spent.
    Reverted,
}

/// What a tile selection did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Selected(Coord),
    /// The selected tile was chosen again.
    Cancelled,
    /// A non-adjacent tile replaced the selection.
    Replaced(Coord),
    Swapped(SwapOutcome),
}

/// What one call to [`GameSession::step`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// No cascade in flight.
    Quiet,
    /// A cascade stage ran and more remain.
    Advanced(CascadeStage),
    /// The cascade reached `Stable` and the turn was closed.
    Settled(Phase),
}

/// One player's game.
#[derive(Debug, Clone)]
pub struct GameSession<R = SimpleRng> {
    level: LevelConfig,
    grid: Grid,
    turn: TurnState,
    selected: Option<Coord>,
    cascade: Option<Cascade>,
    rng: R,
    events: Vec<GameEvent>,
    attempt: u32,
    fault: Option<InvariantViolation>,
}

impl GameSession<SimpleRng> {
    /// Start a level with the deterministic LCG.
    pub fn with_seed(config: LevelConfig, seed: u32) -> Result<Self, GameError> {
        Self::new(config, SimpleRng::new(seed))
    }
}

impl<R: TokenRng> GameSession<R> {
    /// Start a level on a freshly generated, match-free board.
    #[instrument(level = "debug", skip(rng))]
    pub fn new(config: LevelConfig, mut rng: R) -> Result<Self, GameError> {
        validate_config(&config)?;
        let grid = Grid::create(config.size, &config.palette, &mut rng)?;
        Ok(Self::assemble(config, grid, rng))
    }

    /// Start a level on a prepared board. `config.size` is taken from the grid.
    ///
    /// The board must be full. It may already contain matches; they are left
    /// alone until a swap starts a cascade.
    pub fn with_grid(config: LevelConfig, grid: Grid, rng: R) -> Result<Self, GameError> {
        let config = LevelConfig {
            size: grid.size(),
            ..config
        };
        validate_config(&config)?;
        if let Some(hole) = grid.first_empty() {
            return Err(InvariantViolation::EmptyCellAtRest(hole).into());
        }
        Ok(Self::assemble(config, grid, rng))
    }

    fn assemble(level: LevelConfig, grid: Grid, rng: R) -> Self {
        let mut session = Self {
            turn: TurnState::new(level.goal, level.moves),
            level,
            grid,
            selected: None,
            cascade: None,
            rng,
            events: Vec::new(),
            attempt: 0,
            fault: None,
        };
        session.events.push(GameEvent::BoardInitialized {
            board: session.grid.snapshot(),
        });
        session
    }

    pub fn level(&self) -> &LevelConfig {
        &self.level
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn turn(&self) -> TurnState {
        self.turn
    }

    pub fn phase(&self) -> Phase {
        self.turn.phase
    }

    pub fn score(&self) -> u32 {
        self.turn.score
    }

    pub fn moves_remaining(&self) -> u32 {
        self.turn.moves_remaining
    }

    pub fn goal(&self) -> u32 {
        self.turn.goal
    }

    pub fn selected(&self) -> Option<Coord> {
        self.selected
    }

    /// Number of retries of the current level.
    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    /// The violation that faulted this session, if any.
    pub fn fault(&self) -> Option<&InvariantViolation> {
        self.fault.as_ref()
    }

    /// Next cascade stage to run, while a cascade is in flight.
    pub fn cascade_stage(&self) -> Option<CascadeStage> {
        self.cascade.as_ref().map(Cascade::stage)
    }

    /// Events not yet drained, oldest first.
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Replace the level and generate a new board.
    #[instrument(level = "debug", skip(self), fields(level = config.level))]
    pub fn initialize_level(&mut self, config: LevelConfig) -> Result<(), GameError> {
        self.ensure_not_resolving()?;
        validate_config(&config)?;
        let grid = Grid::create(config.size, &config.palette, &mut self.rng)?;
        self.attempt = 0;
        self.load(config, grid);
        Ok(())
    }

    /// Restart the current level on a new board with fresh score and moves.
    #[instrument(level = "debug", skip(self))]
    pub fn retry_level(&mut self) -> Result<(), GameError> {
        self.ensure_not_resolving()?;
        let config = self.level.clone();
        let grid = Grid::create(config.size, &config.palette, &mut self.rng)?;
        self.attempt += 1;
        self.load(config, grid);
        Ok(())
    }

    /// Move to the next level number with new parameters. The board size is kept.
    #[instrument(level = "debug", skip(self, palette))]
    pub fn advance_level(
        &mut self,
        palette: Palette,
        goal: u32,
        moves: u32,
    ) -> Result<(), GameError> {
        let config = LevelConfig {
            level: self.level.level + 1,
            size: self.level.size,
            palette,
            goal,
            moves,
        };
        self.initialize_level(config)
    }

    fn load(&mut self, level: LevelConfig, grid: Grid) {
        self.turn = TurnState::new(level.goal, level.moves);
        self.level = level;
        self.grid = grid;
        self.selected = None;
        self.cascade = None;
        self.events.push(GameEvent::BoardInitialized {
            board: self.grid.snapshot(),
        });
        debug!(
            level = self.level.level,
            attempt = self.attempt,
            goal = self.turn.goal,
            moves = self.turn.moves_remaining,
            "level loaded"
        );
    }

    /// Player picks a tile.
    #[instrument(level = "debug", skip(self))]
    pub fn select(&mut self, coord: Coord) -> Result<Selection, GameError> {
        self.ensure_accepting()?;
        if !self.grid.contains(coord) {
            return Err(Rejection::OutOfBounds(coord).into());
        }

        match self.selected {
            None => {
                self.selected = Some(coord);
                self.turn.phase = Phase::SwapPending;
                Ok(Selection::Selected(coord))
            }
            Some(prev) if prev == coord => {
                self.deselect();
                Ok(Selection::Cancelled)
            }
            Some(prev) if !prev.is_adjacent(coord) => {
                self.selected = Some(coord);
                Ok(Selection::Replaced(coord))
            }
            Some(prev) => self.request_swap(prev, coord).map(Selection::Swapped),
        }
    }

    /// Drop the pending selection, if any.
    pub fn deselect(&mut self) {
        self.selected = None;
        if self.turn.phase == Phase::SwapPending {
            self.turn.phase = Phase::Idle;
        }
    }

    /// Swap two adjacent tiles. Keeps the swap only if it produces a match.
    #[instrument(level = "debug", skip(self))]
    pub fn request_swap(&mut self, a: Coord, b: Coord) -> Result<SwapOutcome, GameError> {
        self.ensure_accepting()?;
        for c in [a, b] {
            if !self.grid.contains(c) {
                return Err(Rejection::OutOfBounds(c).into());
            }
        }
        if !a.is_adjacent(b) {
            return Err(Rejection::NotAdjacent(a, b).into());
        }

        self.selected = None;
        self.grid.swap(a, b);
        let accepted = has_match(&self.grid);
        self.events.push(GameEvent::SwapAttempted { a, b, accepted });

        if accepted {
            debug!(%a, %b, "swap accepted");
            self.turn.phase = Phase::CascadeResolving;
            self.cascade = Some(Cascade::new());
            Ok(SwapOutcome::Accepted)
        } else {
            debug!(%a, %b, "swap reverted");
            self.grid.swap(a, b);
            self.turn.phase = Phase::Idle;
            Ok(SwapOutcome::Reverted)
        }
    }

    /// Run one cascade stage.
    pub fn step(&mut self) -> Result<Progress, GameError> {
        self.ensure_live()?;
        let Some(cascade) = self.cascade.as_mut() else {
            return Ok(Progress::Quiet);
        };

        let mut ctx = CascadeContext {
            grid: &mut self.grid,
            palette: &self.level.palette,
            rng: &mut self.rng,
            score: &mut self.turn.score,
            events: &mut self.events,
        };
        let outcome = cascade
            .step(&mut ctx)
            .map(|ran| (ran, cascade.is_stable()));

        match outcome {
            Err(violation) => Err(self.record_fault(violation)),
            Ok((ran, false)) => Ok(Progress::Advanced(ran)),
            Ok((_, true)) => {
                if let Some(done) = self.cascade.take() {
                    let report = done.report();
                    debug!(cycles = report.cycles, gained = report.gained, "cascade settled");
                }
                self.finish_turn();
                Ok(Progress::Settled(self.turn.phase))
            }
        }
    }

    /// Run the cascade in flight to completion. Returns the resulting phase.
    pub fn resolve_turn(&mut self) -> Result<Phase, GameError> {
        loop {
            match self.step()? {
                Progress::Advanced(_) => continue,
                Progress::Settled(phase) => return Ok(phase),
                Progress::Quiet => return Ok(self.turn.phase),
            }
        }
    }

    /// A swap that would produce a match, while swaps are accepted.
    pub fn hint(&self) -> Option<(Coord, Coord)> {
        if self.fault.is_some() || !self.turn.phase.accepts_swaps() {
            return None;
        }
        find_hint(&self.grid)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.board.size = self.grid.size();
        out.board.cells.clear();
        out.board.cells.extend_from_slice(self.grid.cells());
        out.level = self.level.level;
        out.attempt = self.attempt;
        out.score = self.turn.score;
        out.goal = self.turn.goal;
        out.moves_remaining = self.turn.moves_remaining;
        out.phase = self.turn.phase;
        out.selected = self.selected;
        out.mission = self.level.mission();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    fn finish_turn(&mut self) {
        let turn = &mut self.turn;
        turn.moves_remaining = turn.moves_remaining.saturating_sub(1);

        let reason = if turn.goal_reached() {
            turn.phase = Phase::Won;
            Some(TurnEndReason::GoalReached)
        } else if turn.moves_remaining == 0 {
            turn.phase = Phase::Lost;
            Some(TurnEndReason::MovesExhausted)
        } else {
            turn.phase = Phase::Idle;
            None
        };

        debug!(
            score = turn.score,
            moves_remaining = turn.moves_remaining,
            phase = %turn.phase,
            "turn closed"
        );
        if let Some(reason) = reason {
            self.events.push(GameEvent::TurnEnded {
                reason,
                score: self.turn.score,
                moves_remaining: self.turn.moves_remaining,
            });
        }
    }

    fn record_fault(&mut self, violation: InvariantViolation) -> GameError {
        warn!(error = %violation, phase = %self.turn.phase, "invariant violated, session faulted");
        self.fault = Some(violation.clone());
        self.cascade = None;
        GameError::Invariant(violation)
    }

    fn ensure_live(&self) -> Result<(), GameError> {
        match &self.fault {
            Some(v) => Err(GameError::Invariant(v.clone())),
            None => Ok(()),
        }
    }

    fn ensure_accepting(&self) -> Result<(), GameError> {
        self.ensure_live()?;
        if !self.turn.phase.accepts_swaps() {
            return Err(Rejection::NotAccepting(self.turn.phase).into());
        }
        Ok(())
    }

    fn ensure_not_resolving(&self) -> Result<(), GameError> {
        self.ensure_live()?;
        if self.turn.phase == Phase::CascadeResolving {
            return Err(Rejection::NotAccepting(self.turn.phase).into());
        }
        Ok(())
    }
}

fn validate_config(config: &LevelConfig) -> Result<(), Rejection> {
    validate_level_shape(config.size, &config.palette)?;
    if config.goal == 0 {
        return Err(Rejection::InvalidGoal);
    }
    if config.moves == 0 {
        return Err(Rejection::InvalidMoveBudget);
    }
    Ok(())
}
