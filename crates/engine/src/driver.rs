//! Cascade pacing for hosts.
//!
//! The rules engine never waits. A [`Driver`] decides when the next cascade
//! stage runs: immediately ([`Pacing::Instant`]) or after the animation delay
//! of the stage that just finished ([`Pacing::Paced`]). Pacing only changes
//! timing; the sequence of stages and the final board are the same.

use tracing::trace;

use crate::core::{CascadeStage, GameError, GameSession, Progress, TokenRng};
use crate::types::{Phase, CLEAR_ANIM_MS, DETONATE_STAGGER_MS, DROP_ANIM_MS, SWAP_ANIM_MS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pacing {
    /// Resolve the whole cascade on the first tick.
    Instant,
    /// One stage per tick, waiting out each stage's animation.
    #[default]
    Paced,
}

impl Pacing {
    /// Parse `"paced"` or `"instant"` (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "paced" => Some(Pacing::Paced),
            "instant" => Some(Pacing::Instant),
            _ => None,
        }
    }
}

/// What a tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// No cascade in flight.
    Idle,
    /// Still playing the previous stage's animation.
    Waiting { remaining_ms: u32 },
    /// One stage ran and more remain.
    Stepped(CascadeStage),
    /// The cascade finished and the turn closed in this phase.
    Settled(Phase),
}

/// Animation time a host shows after `stage` completes (ms).
pub fn stage_delay_ms(stage: CascadeStage) -> u32 {
    match stage {
        CascadeStage::Clear => CLEAR_ANIM_MS,
        CascadeStage::Detonate => DETONATE_STAGGER_MS,
        CascadeStage::Gravity | CascadeStage::Refill => DROP_ANIM_MS,
        CascadeStage::Detect
        | CascadeStage::Score
        | CascadeStage::Resolve
        | CascadeStage::Stable => 0,
    }
}

#[derive(Debug, Clone)]
pub struct Driver {
    pacing: Pacing,
    wait_ms: u32,
}

impl Driver {
    pub fn new(pacing: Pacing) -> Self {
        Self { pacing, wait_ms: 0 }
    }

    pub fn pacing(&self) -> Pacing {
        self.pacing
    }

    pub fn is_waiting(&self) -> bool {
        self.wait_ms > 0
    }

    /// A swap was accepted; hold the cascade for the swap animation.
    pub fn notify_swap(&mut self) {
        if self.pacing == Pacing::Paced {
            self.wait_ms = SWAP_ANIM_MS;
        }
    }

    /// Drop any pending delay (level reset, retry).
    pub fn reset(&mut self) {
        self.wait_ms = 0;
    }

    /// Advance the session's cascade by `elapsed_ms` of host time.
    pub fn tick<R: TokenRng>(
        &mut self,
        session: &mut GameSession<R>,
        elapsed_ms: u32,
    ) -> Result<Tick, GameError> {
        if session.cascade_stage().is_none() {
            self.wait_ms = 0;
            return Ok(Tick::Idle);
        }

        if self.pacing == Pacing::Instant {
            return session.resolve_turn().map(Tick::Settled);
        }

        if self.wait_ms > elapsed_ms {
            self.wait_ms -= elapsed_ms;
            return Ok(Tick::Waiting {
                remaining_ms: self.wait_ms,
            });
        }
        self.wait_ms = 0;

        match session.step()? {
            Progress::Quiet => Ok(Tick::Idle),
            Progress::Advanced(stage) => {
                self.wait_ms = stage_delay_ms(stage);
                trace!(?stage, wait_ms = self.wait_ms, "paced step");
                Ok(Tick::Stepped(stage))
            }
            Progress::Settled(phase) => Ok(Tick::Settled(phase)),
        }
    }
}

impl Default for Driver {
    fn default() -> Self {
        Self::new(Pacing::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Grid, SequenceRng};
    use crate::types::{Coord, LevelConfig, Palette};

    fn swapped_session() -> GameSession<SequenceRng> {
        let grid = Grid::from_ascii(&["AAB", "CDA", "DCD"]).unwrap();
        let config = LevelConfig {
            level: 1,
            size: 3,
            palette: Palette::first(4),
            goal: 1000,
            moves: 5,
        };
        let rng = SequenceRng::new(vec![1, 2, 3, 0]);
        let mut s = GameSession::with_grid(config, grid, rng).unwrap();
        s.request_swap(Coord::new(0, 2), Coord::new(1, 2)).unwrap();
        s
    }

    #[test]
    fn test_parse_pacing() {
        assert_eq!(Pacing::parse("Paced"), Some(Pacing::Paced));
        assert_eq!(Pacing::parse(" instant "), Some(Pacing::Instant));
        assert_eq!(Pacing::parse("slow"), None);
    }

    #[test]
    fn test_idle_without_cascade() {
        let grid = Grid::from_ascii(&["ABC", "BCA", "CAB"]).unwrap();
        let config = LevelConfig {
            size: 3,
            ..LevelConfig::default()
        };
        let mut s = GameSession::with_grid(config, grid, SequenceRng::new(vec![0])).unwrap();
        let mut driver = Driver::new(Pacing::Paced);
        assert_eq!(driver.tick(&mut s, 16).unwrap(), Tick::Idle);
    }

    #[test]
    fn test_instant_settles_in_one_tick() {
        let mut s = swapped_session();
        let mut driver = Driver::new(Pacing::Instant);
        driver.notify_swap();
        assert!(!driver.is_waiting());
        assert_eq!(driver.tick(&mut s, 0).unwrap(), Tick::Settled(Phase::Idle));
        assert_eq!(s.score(), 100);
    }

    #[test]
    fn test_paced_waits_between_stages() {
        let mut s = swapped_session();
        let mut driver = Driver::new(Pacing::Paced);
        driver.notify_swap();

        assert_eq!(
            driver.tick(&mut s, 100).unwrap(),
            Tick::Waiting { remaining_ms: 200 }
        );
        assert_eq!(driver.tick(&mut s, 200).unwrap(), Tick::Stepped(CascadeStage::Detect));
        assert_eq!(driver.tick(&mut s, 16).unwrap(), Tick::Stepped(CascadeStage::Score));
        assert_eq!(driver.tick(&mut s, 16).unwrap(), Tick::Stepped(CascadeStage::Resolve));
        assert_eq!(driver.tick(&mut s, 16).unwrap(), Tick::Stepped(CascadeStage::Clear));
        assert_eq!(
            driver.tick(&mut s, 16).unwrap(),
            Tick::Waiting { remaining_ms: 384 }
        );
        assert_eq!(driver.tick(&mut s, 400).unwrap(), Tick::Stepped(CascadeStage::Gravity));
        assert_eq!(driver.tick(&mut s, 500).unwrap(), Tick::Stepped(CascadeStage::Refill));
        assert_eq!(driver.tick(&mut s, 500).unwrap(), Tick::Settled(Phase::Idle));
        assert_eq!(driver.tick(&mut s, 500).unwrap(), Tick::Idle);
    }

    #[test]
    fn test_pacing_does_not_change_outcome() {
        let mut fast = swapped_session();
        let mut slow = swapped_session();

        Driver::new(Pacing::Instant).tick(&mut fast, 0).unwrap();

        let mut driver = Driver::new(Pacing::Paced);
        loop {
            if let Tick::Settled(_) = driver.tick(&mut slow, 1000).unwrap() {
                break;
            }
        }

        assert_eq!(fast.grid(), slow.grid());
        assert_eq!(fast.score(), slow.score());
        assert_eq!(fast.drain_events(), slow.drain_events());
    }
}
