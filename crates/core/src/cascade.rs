//! Cascade engine - runs one accepted swap to quiescence
//!
//! The cascade is an explicit step machine so a host can pace it (one stage per
//! animation) or drive it to completion immediately. Every call to
//! [`Cascade::step`] runs exactly one stage and leaves the board consistent:
//!
//! ```text
//! Detect -> Score -> Resolve -> Clear -> Detonate* -> Gravity -> Refill -> Detect ...
//!    \-> Stable (no matches)
//! ```
//!
//! - **Detect**: the board must be full here; finds matches or stops.
//! - **Score**: `100 * k * k`, `k = matched / 3`.
//! - **Resolve**: marks special cells (see [`crate::resolver`]).
//! - **Clear**: empties matched cells that do not carry a marker.
//! - **Detonate**: one queued special per step; specials emptied by an earlier
//!   detonation are skipped without effect.
//! - **Gravity**: stable per-column compaction towards the bottom.
//! - **Refill**: empty cells are filled top to bottom from the palette.

use std::collections::VecDeque;

use arrayvec::ArrayVec;
use tracing::{debug, trace};

use crate::error::InvariantViolation;
use crate::grid::Grid;
use crate::matcher::{find_matches, MatchSet};
use crate::resolver::resolve_specials;
use crate::rng::TokenRng;
use crate::scoring::{detonation_score, match_score};
use crate::types::{
    Axis, Candy, ClearCause, Coord, GameEvent, Palette, SpecialKind, MAX_CASCADE_CYCLES,
};

/// Stages of the cascade step machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CascadeStage {
    Detect,
    Score,
    Resolve,
    Clear,
    Detonate,
    Gravity,
    Refill,
    Stable,
}

/// Everything a cascade step reads or mutates.
pub struct CascadeContext<'a, R: TokenRng> {
    pub grid: &'a mut Grid,
    pub palette: &'a Palette,
    pub rng: &'a mut R,
    pub score: &'a mut u32,
    pub events: &'a mut Vec<GameEvent>,
}

impl<R: TokenRng> CascadeContext<'_, R> {
    fn award(&mut self, delta: u32) {
        if delta == 0 {
            return;
        }
        *self.score = self.score.saturating_add(delta);
        self.events.push(GameEvent::ScoreChanged {
            delta,
            total: *self.score,
        });
    }
}

/// Totals of a cascade that reached `Stable`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CascadeReport {
    /// Completed detect/refill cycles
    pub cycles: u32,
    /// Points awarded during the cascade
    pub gained: u32,
}

/// One cascade in flight.
#[derive(Debug, Clone)]
pub struct Cascade {
    stage: CascadeStage,
    cycle: u32,
    max_cycles: u32,
    matches: MatchSet,
    pending: VecDeque<Coord>,
    gained: u32,
}

impl Cascade {
    pub fn new() -> Self {
        Self::with_cycle_limit(MAX_CASCADE_CYCLES)
    }

    /// A cascade that reports [`InvariantViolation::CascadeDidNotSettle`]
    /// instead of starting cycle `max_cycles + 1`.
    pub fn with_cycle_limit(max_cycles: u32) -> Self {
        Self {
            stage: CascadeStage::Detect,
            cycle: 0,
            max_cycles,
            matches: MatchSet::default(),
            pending: VecDeque::new(),
            gained: 0,
        }
    }

    /// The stage the next call to [`Cascade::step`] will run.
    pub fn stage(&self) -> CascadeStage {
        self.stage
    }

    pub fn is_stable(&self) -> bool {
        self.stage == CascadeStage::Stable
    }

    pub fn cycle(&self) -> u32 {
        self.cycle
    }

    pub fn gained(&self) -> u32 {
        self.gained
    }

    /// Matches found by the most recent Detect.
    pub fn matches(&self) -> &MatchSet {
        &self.matches
    }

    /// Specials still waiting to detonate this cycle.
    pub fn pending_detonations(&self) -> impl Iterator<Item = &Coord> {
        self.pending.iter()
    }

    pub fn report(&self) -> CascadeReport {
        CascadeReport {
            cycles: self.cycle,
            gained: self.gained,
        }
    }

    /// Run one stage. Returns the stage that ran.
    pub fn step<R: TokenRng>(
        &mut self,
        ctx: &mut CascadeContext<'_, R>,
    ) -> Result<CascadeStage, InvariantViolation> {
        let ran = self.stage;
        trace!(stage = ?ran, cycle = self.cycle, "cascade step");

        match ran {
            CascadeStage::Stable => {}
            CascadeStage::Detect => self.detect(ctx)?,
            CascadeStage::Score => {
                let gain = match_score(self.matches.len());
                self.gained = self.gained.saturating_add(gain);
                ctx.award(gain);
                self.stage = CascadeStage::Resolve;
            }
            CascadeStage::Resolve => self.resolve(ctx),
            CascadeStage::Clear => self.clear(ctx),
            CascadeStage::Detonate => self.detonate_next(ctx),
            CascadeStage::Gravity => {
                apply_gravity(ctx.grid, ctx.events);
                self.stage = CascadeStage::Refill;
            }
            CascadeStage::Refill => {
                refill(ctx.grid, ctx.palette, ctx.rng, ctx.events);
                self.cycle += 1;
                self.stage = CascadeStage::Detect;
            }
        }

        Ok(ran)
    }

    /// Step until `Stable`.
    pub fn run<R: TokenRng>(
        &mut self,
        ctx: &mut CascadeContext<'_, R>,
    ) -> Result<CascadeReport, InvariantViolation> {
        while !self.is_stable() {
            self.step(ctx)?;
        }
        Ok(self.report())
    }

    fn detect<R: TokenRng>(
        &mut self,
        ctx: &mut CascadeContext<'_, R>,
    ) -> Result<(), InvariantViolation> {
        if let Some(hole) = ctx.grid.first_empty() {
            return Err(InvariantViolation::EmptyCellAtRest(hole));
        }

        self.matches = find_matches(ctx.grid);
        if self.matches.is_empty() {
            debug!(cycles = self.cycle, gained = self.gained, "cascade stable");
            self.stage = CascadeStage::Stable;
            return Ok(());
        }
        if self.cycle >= self.max_cycles {
            return Err(InvariantViolation::CascadeDidNotSettle { cycles: self.cycle });
        }

        debug!(
            cycle = self.cycle,
            matched = self.matches.len(),
            runs = self.matches.runs().len(),
            "matches detected"
        );
        self.stage = CascadeStage::Score;
        Ok(())
    }

    fn resolve<R: TokenRng>(&mut self, ctx: &mut CascadeContext<'_, R>) {
        // New markers detonate in the order their cells were discovered,
        // then matched cells already carrying a marker.
        let mut placements = resolve_specials(ctx.grid, &self.matches);
        let cells = self.matches.cells();
        placements.sort_by_key(|p| cells.iter().position(|&c| c == p.at));

        let carried: Vec<Coord> = cells
            .iter()
            .copied()
            .filter(|&c| {
                special_at(ctx.grid, c).is_some() && !placements.iter().any(|p| p.at == c)
            })
            .collect();

        self.pending.clear();
        for p in &placements {
            ctx.grid.set(p.at, Some(Candy::special(p.token, p.kind)));
            ctx.events.push(GameEvent::SpecialCreated {
                at: p.at,
                kind: p.kind,
            });
            self.pending.push_back(p.at);
        }
        self.pending.extend(carried);

        self.stage = CascadeStage::Clear;
    }

    fn clear<R: TokenRng>(&mut self, ctx: &mut CascadeContext<'_, R>) {
        let mut cleared = Vec::with_capacity(self.matches.len());
        for &c in self.matches.cells() {
            if special_at(ctx.grid, c).is_none() && ctx.grid.clear(c).is_some() {
                cleared.push(c);
            }
        }
        if !cleared.is_empty() {
            ctx.events.push(GameEvent::CellsCleared {
                cells: cleared,
                cause: ClearCause::Match,
            });
        }

        self.stage = if self.pending.is_empty() {
            CascadeStage::Gravity
        } else {
            CascadeStage::Detonate
        };
    }

    fn detonate_next<R: TokenRng>(&mut self, ctx: &mut CascadeContext<'_, R>) {
        while let Some(at) = self.pending.pop_front() {
            match special_at(ctx.grid, at) {
                Some(kind) => {
                    let gain = detonate(ctx, at, kind);
                    self.gained = self.gained.saturating_add(gain);
                    break;
                }
                None => trace!(%at, "queued special already consumed"),
            }
        }

        if self.pending.is_empty() {
            self.stage = CascadeStage::Gravity;
        }
    }
}

impl Default for Cascade {
    fn default() -> Self {
        Self::new()
    }
}

fn special_at(grid: &Grid, at: Coord) -> Option<SpecialKind> {
    grid.get(at).flatten().and_then(|c| c.special)
}

/// The 3x3 block around `at`, clipped to the board, row-major.
pub fn neighbourhood(at: Coord, size: usize) -> ArrayVec<Coord, 9> {
    let mut out = ArrayVec::new();
    let rows = at.row.saturating_sub(1)..=(at.row + 1).min(size - 1);
    for r in rows {
        let cols = at.col.saturating_sub(1)..=(at.col + 1).min(size - 1);
        for c in cols {
            out.push(Coord::new(r, c));
        }
    }
    out
}

/// Cells a special would empty if it detonated now (non-empty only, row-major).
pub fn blast_cells(grid: &Grid, at: Coord, kind: SpecialKind) -> Vec<Coord> {
    let size = grid.size();
    let area: Vec<Coord> = match kind {
        SpecialKind::AreaClear => neighbourhood(at, size).into_iter().collect(),
        SpecialKind::LineClear(Axis::Horizontal) => {
            (0..size).map(|c| Coord::new(at.row, c)).collect()
        }
        SpecialKind::LineClear(Axis::Vertical) => {
            (0..size).map(|r| Coord::new(r, at.col)).collect()
        }
    };
    area.into_iter().filter(|&c| !grid.is_empty(c)).collect()
}

fn detonate<R: TokenRng>(ctx: &mut CascadeContext<'_, R>, at: Coord, kind: SpecialKind) -> u32 {
    let affected = blast_cells(ctx.grid, at, kind);
    for &c in &affected {
        ctx.grid.clear(c);
    }

    let gain = detonation_score(kind, affected.len());
    debug!(%at, kind = kind.as_str(), affected = affected.len(), gain, "special detonated");

    ctx.events.push(GameEvent::CellsCleared {
        cells: affected,
        cause: kind.clear_cause(),
    });
    ctx.award(gain);
    gain
}

/// Compact every column towards the bottom, keeping the relative order of
/// surviving candies. Vacated cells end up at the top of the column.
pub fn apply_gravity(grid: &mut Grid, events: &mut Vec<GameEvent>) {
    let size = grid.size();
    for col in 0..size {
        let mut write = size;
        for row in (0..size).rev() {
            let from = Coord::new(row, col);
            if grid.is_empty(from) {
                continue;
            }
            write -= 1;
            if write != row {
                let cell = grid.clear(from);
                grid.set(Coord::new(write, col), cell);
                events.push(GameEvent::TilesDropped {
                    column: col,
                    from_row: row,
                    to_row: write,
                });
            }
        }
    }
}

/// Fill every empty cell, column by column, top to bottom. Refilled candies
/// never carry a marker.
pub fn refill<R: TokenRng>(
    grid: &mut Grid,
    palette: &Palette,
    rng: &mut R,
    events: &mut Vec<GameEvent>,
) {
    let size = grid.size();
    for col in 0..size {
        let mut cells = Vec::new();
        let mut tokens = Vec::new();
        for row in 0..size {
            let at = Coord::new(row, col);
            if !grid.is_empty(at) {
                continue;
            }
            let token = rng.pick(palette);
            grid.set(at, Some(Candy::plain(token)));
            cells.push(at);
            tokens.push(token);
        }
        if !cells.is_empty() {
            events.push(GameEvent::TilesRefilled {
                column: col,
                cells,
                tokens,
            });
        }
    }
}
