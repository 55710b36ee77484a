//! Host state between the terminal loop and the session.
//!
//! Turns [`HostAction`]s into session calls, owns the cursor, the hint and the
//! status line, and reads the session's events to keep them up to date.
//! Recoverable rejections become a status message; invariant violations are
//! returned to the caller.

use tracing::{debug, info, trace};

use crate::core::{GameError, GameSession, GameSnapshot, Selection, SwapOutcome};
use crate::engine::{Driver, Tick};
use crate::input::{BoardCursor, HostAction};
use crate::term::{BoardView, FrameBuffer, Marks, Viewport};
use crate::types::{Coord, GameEvent, LevelConfig, Phase, SpecialKind, TurnEndReason};
use crate::AppConfig;

pub struct Host {
    session: GameSession,
    driver: Driver,
    cursor: BoardCursor,
    hint: Option<(Coord, Coord)>,
    message: Option<String>,
    snapshot: GameSnapshot,
}

impl Host {
    pub fn new(config: &AppConfig) -> Result<Self, GameError> {
        let level = LevelConfig::builtin(config.level).unwrap_or_default();
        let session = GameSession::with_seed(level, config.seed)?;
        let mut host = Self {
            cursor: BoardCursor::new(session.level().size),
            session,
            driver: Driver::new(config.pacing),
            hint: None,
            message: None,
            snapshot: GameSnapshot::default(),
        };
        host.absorb_events();
        Ok(host)
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn cursor(&self) -> Coord {
        self.cursor.coord()
    }

    pub fn place_cursor(&mut self, at: Coord) {
        self.cursor.place(at);
    }

    pub fn hint(&self) -> Option<(Coord, Coord)> {
        self.hint
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn apply(&mut self, action: HostAction) -> Result<(), GameError> {
        trace!(?action, "host action");
        let result = match action {
            HostAction::Move(dir) => {
                self.cursor.step(dir);
                Ok(())
            }
            HostAction::Select => self.select(),
            HostAction::Deselect => {
                self.session.deselect();
                Ok(())
            }
            HostAction::Hint => {
                self.show_hint();
                Ok(())
            }
            HostAction::Retry => self.session.retry_level(),
            HostAction::NextLevel => self.next_level(),
        };

        match result {
            Err(e) if !e.is_fatal() => {
                debug!(code = e.code(), error = %e, "action rejected");
                self.message = Some(e.to_string());
            }
            other => other?,
        }
        self.absorb_events();
        Ok(())
    }

    /// Advance the cascade by `elapsed_ms` of wall time.
    pub fn tick(&mut self, elapsed_ms: u32) -> Result<Tick, GameError> {
        let tick = self.driver.tick(&mut self.session, elapsed_ms)?;
        if !matches!(tick, Tick::Idle | Tick::Waiting { .. }) {
            self.absorb_events();
        }
        Ok(tick)
    }

    pub fn render_into(&mut self, view: &BoardView, viewport: Viewport, fb: &mut FrameBuffer) {
        self.session.snapshot_into(&mut self.snapshot);
        let marks = Marks {
            cursor: Some(self.cursor.coord()),
            hint: self.hint,
            message: self.message.as_deref(),
        };
        view.render_into(&self.snapshot, &marks, viewport, fb);
    }

    fn select(&mut self) -> Result<(), GameError> {
        match self.session.select(self.cursor.coord())? {
            Selection::Swapped(SwapOutcome::Accepted) => {
                self.driver.notify_swap();
                self.hint = None;
            }
            Selection::Swapped(SwapOutcome::Reverted) => {
                self.message = Some("No match - tiles swapped back".to_string());
            }
            Selection::Selected(_) | Selection::Replaced(_) | Selection::Cancelled => {}
        }
        Ok(())
    }

    fn show_hint(&mut self) {
        self.hint = self.session.hint();
        if self.hint.is_none() && self.session.phase().accepts_swaps() {
            self.message = Some("No moves left - press r to retry".to_string());
        }
    }

    /// After a win: the next built-in level, or level 1 after the last one.
    fn next_level(&mut self) -> Result<(), GameError> {
        if self.session.phase() != Phase::Won {
            self.message = Some("Reach the goal first".to_string());
            return Ok(());
        }
        match LevelConfig::builtin(self.session.level().level + 1) {
            Some(next) => self.session.advance_level(next.palette, next.goal, next.moves),
            None => self.session.initialize_level(LevelConfig::default()),
        }
    }

    fn absorb_events(&mut self) {
        for event in self.session.drain_events() {
            trace!(?event, "game event");
            match event {
                GameEvent::BoardInitialized { board } => {
                    self.cursor.resize(board.size);
                    self.hint = None;
                    self.message = Some(self.session.level().mission());
                    self.driver.reset();
                    info!(level = self.session.level().level, "level started");
                }
                GameEvent::SwapAttempted { accepted: true, .. } => self.message = None,
                GameEvent::SpecialCreated { kind, .. } => {
                    let text = match kind {
                        SpecialKind::AreaClear => "Area clear!",
                        SpecialKind::LineClear(_) => "Line clear!",
                    };
                    self.message = Some(text.to_string());
                }
                GameEvent::TurnEnded { reason, score, .. } => {
                    info!(?reason, score, "level over");
                    self.message = Some(match reason {
                        TurnEndReason::GoalReached => format!("Level complete with {score} points"),
                        TurnEndReason::MovesExhausted => format!("Out of moves at {score} points"),
                    });
                }
                GameEvent::SwapAttempted { .. }
                | GameEvent::CellsCleared { .. }
                | GameEvent::TilesDropped { .. }
                | GameEvent::TilesRefilled { .. }
                | GameEvent::ScoreChanged { .. } => {}
            }
        }
    }
}
