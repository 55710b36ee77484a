use candy_swap::core::{GameSession, GameSnapshot};
use candy_swap::term::{AnchorY, BoardView, FrameBuffer, Marks, Viewport};
use candy_swap::types::{Coord, LevelConfig, Phase};

fn fresh_snapshot() -> GameSnapshot {
    GameSession::with_seed(LevelConfig::default(), 1)
        .unwrap()
        .snapshot()
}

fn screen_text(fb: &FrameBuffer) -> String {
    (0..fb.height())
        .map(|y| fb.row_text(y))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn term_view_centres_board_in_viewport() {
    let view = BoardView::default();
    let rect = view.board_rect(8, Viewport::new(60, 20));
    assert_eq!((rect.x, rect.y, rect.w, rect.h), (21, 5, 18, 10));

    let top = BoardView::default().with_anchor_y(AnchorY::Top);
    assert_eq!(top.board_rect(8, Viewport::new(60, 20)).y, 0);
}

#[test]
fn term_view_draws_side_panel_when_wide_enough() {
    let mut snap = fresh_snapshot();
    snap.score = 1234;

    let fb = BoardView::default().render(&snap, &Marks::default(), Viewport::new(60, 20));
    let all = screen_text(&fb);
    for label in ["LEVEL", "SCORE", "GOAL", "MOVES"] {
        assert!(all.contains(label), "missing {label} in:\n{all}");
    }
    assert!(all.contains("1234"));
    assert!(all.contains("100%"));
    assert!(all.contains("Score 1000"));
}

#[test]
fn term_view_skips_side_panel_when_narrow() {
    let snap = fresh_snapshot();
    let fb = BoardView::default().render(&snap, &Marks::default(), Viewport::new(24, 12));
    assert!(!screen_text(&fb).contains("SCORE"));
}

#[test]
fn term_view_shows_message_under_board() {
    let marks = Marks {
        message: Some("Line clear!"),
        ..Marks::default()
    };
    let fb = BoardView::default().render(&fresh_snapshot(), &marks, Viewport::new(30, 14));
    let rect = BoardView::default().board_rect(8, Viewport::new(30, 14));
    assert!(fb.row_text(rect.y + rect.h).contains("Line clear!"));
}

#[test]
fn term_view_overlays_end_of_level() {
    let mut snap = fresh_snapshot();
    snap.phase = Phase::Won;
    let fb = BoardView::default().render(&snap, &Marks::default(), Viewport::new(18, 10));
    assert!(fb.row_text(5).contains("LEVEL COMPLETE!"));
    assert!(fb.row_text(6).contains("n next"));

    snap.phase = Phase::Lost;
    let fb = BoardView::default().render(&snap, &Marks::default(), Viewport::new(18, 10));
    assert!(fb.row_text(5).contains("OUT OF MOVES"));
}

#[test]
fn term_view_marks_cursor_cell() {
    let snap = fresh_snapshot();
    let plain = BoardView::default().render(&snap, &Marks::default(), Viewport::new(18, 10));
    let marks = Marks {
        cursor: Some(Coord::new(2, 3)),
        ..Marks::default()
    };
    let marked = BoardView::default().render(&snap, &marks, Viewport::new(18, 10));

    // Cell (2,3) sits at x = 1 + 3 * 2, y = 1 + 2.
    let (x, y) = (7, 3);
    assert_ne!(marked.get(x, y).unwrap().style.bg, plain.get(x, y).unwrap().style.bg);
    assert_eq!(marked.get(x, y).unwrap().ch, plain.get(x, y).unwrap().ch);
    assert_eq!(marked.get(1, 1), plain.get(1, 1));
}
