//! Property/invariant tests for board generation and cascade resolution.
//!
//! Invariants covered:
//! - A fresh board is full and has no match.
//! - After every resolved turn the board is full and has no match.
//! - Score never decreases and every accepted swap spends exactly one move.
//! - A cascade started from any full board settles within the cycle cap.
//! - Gravity keeps the relative order of candies within a column.

use proptest::prelude::*;

use candy_swap::core::{
    apply_gravity, has_match, Cascade, CascadeContext, CascadeStage, GameSession, Grid, SimpleRng,
};
use candy_swap::types::{Candy, Cell, Coord, LevelConfig, Palette, Phase, TokenType};

fn assert_at_rest(grid: &Grid) {
    assert!(grid.is_full(), "hole at {:?}", grid.first_empty());
    assert!(!has_match(grid), "match left on board: {:?}", grid.to_ascii());
}

fn config(size: usize, candies: usize) -> LevelConfig {
    LevelConfig {
        level: 1,
        size,
        palette: Palette::first(candies),
        goal: u32::MAX,
        moves: 30,
    }
}

#[test]
fn hint_rollout_on_default_level_stays_at_rest() {
    let mut s = GameSession::with_seed(LevelConfig::default(), 20260228).unwrap();
    assert_at_rest(s.grid());

    while let Some((a, b)) = s.hint() {
        s.request_swap(a, b).unwrap();
        s.resolve_turn().unwrap();
        assert_at_rest(s.grid());
        if s.phase().is_terminal() {
            break;
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn fresh_board_is_full_and_match_free(
        seed in any::<u32>(),
        size in 3usize..=12,
        candies in 3usize..=8,
    ) {
        let mut rng = SimpleRng::new(seed);
        let grid = Grid::create(size, &Palette::first(candies), &mut rng).unwrap();
        prop_assert_eq!(grid.size(), size);
        prop_assert!(grid.is_full());
        prop_assert!(!has_match(&grid));
    }

    #[test]
    fn hint_rollout_respects_turn_invariants(
        seed in any::<u32>(),
        size in 4usize..=10,
        candies in 4usize..=7,
        turns in 1usize..12,
    ) {
        let mut s = GameSession::with_seed(config(size, candies), seed).unwrap();

        for _ in 0..turns {
            let Some((a, b)) = s.hint() else { break };
            let before_score = s.score();
            let before_moves = s.moves_remaining();

            s.request_swap(a, b).unwrap();
            prop_assert_eq!(s.phase(), Phase::CascadeResolving);
            let phase = s.resolve_turn().unwrap();

            prop_assert!(s.score() > before_score);
            prop_assert_eq!(s.moves_remaining(), before_moves - 1);
            prop_assert!(s.grid().is_full());
            prop_assert!(!has_match(s.grid()));
            prop_assert!(s.cascade_stage().is_none());
            if phase.is_terminal() {
                prop_assert_eq!(phase, Phase::Lost);
                break;
            }
        }
    }

    // Three candies are left out: on large boards refills keep matching for
    // hundreds of cycles and brush against the cap.
    #[test]
    fn random_board_cascade_settles(
        seed in any::<u32>(),
        size in 3usize..=12,
        candies in 4usize..=8,
        tokens in prop::collection::vec(any::<u8>(), 144),
    ) {
        let rows: Vec<Vec<Cell>> = (0..size)
            .map(|r| {
                (0..size)
                    .map(|c| Some(Candy::plain(TokenType(tokens[r * 12 + c] % candies as u8))))
                    .collect()
            })
            .collect();
        let mut grid = Grid::from_rows(rows).unwrap();
        let palette = Palette::first(candies);
        let mut rng = SimpleRng::new(seed);
        let mut score = 0;
        let mut events = Vec::new();
        let mut ctx = CascadeContext {
            grid: &mut grid,
            palette: &palette,
            rng: &mut rng,
            score: &mut score,
            events: &mut events,
        };

        let mut cascade = Cascade::new();
        let report = cascade.run(&mut ctx);
        prop_assert!(report.is_ok(), "cascade failed: {:?}", report);
        prop_assert_eq!(cascade.stage(), CascadeStage::Stable);
        let report = report.unwrap();
        prop_assert_eq!(score, report.gained);
        prop_assert!(grid.is_full());
        prop_assert!(!has_match(&grid));
    }

    #[test]
    fn gravity_keeps_column_order(
        seed in any::<u32>(),
        size in 3usize..=9,
        holes in prop::collection::vec(any::<bool>(), 81),
    ) {
        let mut grid = Grid::create(size, &Palette::first(6), &mut SimpleRng::new(seed)).unwrap();
        for c in grid.coords().collect::<Vec<_>>() {
            if holes[c.row * 9 + c.col] {
                grid.clear(c);
            }
        }
        let column = |g: &Grid, col: usize| -> Vec<_> {
            (0..size).filter_map(|row| g.get(Coord::new(row, col)).flatten()).collect()
        };
        let before: Vec<_> = (0..size).map(|col| column(&grid, col)).collect();

        let mut events = Vec::new();
        apply_gravity(&mut grid, &mut events);

        for col in 0..size {
            let after = column(&grid, col);
            prop_assert_eq!(&after, &before[col]);
            // Survivors sit at the bottom; empties only above them.
            let empties = size - after.len();
            for row in 0..size {
                prop_assert_eq!(grid.is_empty(Coord::new(row, col)), row < empties);
            }
        }
    }
}
