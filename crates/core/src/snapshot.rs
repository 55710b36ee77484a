use crate::types::{BoardSnapshot, Coord, Phase};

/// Read-only view of a session for hosts and renderers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GameSnapshot {
    pub board: BoardSnapshot,
    pub level: u32,
    /// Retries of the current level
    pub attempt: u32,
    pub score: u32,
    pub goal: u32,
    pub moves_remaining: u32,
    pub phase: Phase,
    pub selected: Option<Coord>,
    pub mission: String,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.board.size = 0;
        self.board.cells.clear();
        self.level = 0;
        self.attempt = 0;
        self.score = 0;
        self.goal = 0;
        self.moves_remaining = 0;
        self.phase = Phase::Idle;
        self.selected = None;
        self.mission.clear();
    }

    /// Goal progress as a percentage, capped at 100.
    pub fn progress_percent(&self) -> u32 {
        if self.goal == 0 {
            return 100;
        }
        let pct = u64::from(self.score) * 100 / u64::from(self.goal);
        pct.min(100) as u32
    }

    /// Whether the player can act right now.
    pub fn playable(&self) -> bool {
        self.phase.accepts_swaps()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_is_capped() {
        let mut s = GameSnapshot {
            goal: 1000,
            score: 250,
            ..Default::default()
        };
        assert_eq!(s.progress_percent(), 25);
        s.score = 5000;
        assert_eq!(s.progress_percent(), 100);
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut s = GameSnapshot {
            level: 3,
            score: 9,
            phase: Phase::Won,
            mission: "x".into(),
            ..Default::default()
        };
        s.clear();
        assert_eq!(s, GameSnapshot::default());
    }
}
