use candy_swap::core::{GameSession, Grid, SequenceRng};
use candy_swap::types::{
    Axis, ClearCause, Coord, GameEvent, LevelConfig, Palette, SpecialKind, TokenType,
    TurnEndReason,
};

#[test]
fn game_events_are_tagged_in_snake_case() {
    let score = serde_json::to_value(GameEvent::ScoreChanged {
        delta: 100,
        total: 250,
    })
    .unwrap();
    assert_eq!(
        score,
        serde_json::json!({"type": "score_changed", "delta": 100, "total": 250})
    );

    let ended = serde_json::to_value(GameEvent::TurnEnded {
        reason: TurnEndReason::MovesExhausted,
        score: 900,
        moves_remaining: 0,
    })
    .unwrap();
    assert_eq!(ended["type"], "turn_ended");
    assert_eq!(ended["reason"], "moves_exhausted");

    let cleared = serde_json::to_value(GameEvent::CellsCleared {
        cells: vec![Coord::new(3, 0)],
        cause: ClearCause::LineClear,
    })
    .unwrap();
    assert_eq!(cleared["cause"], "line_clear");
    assert_eq!(cleared["cells"][0], serde_json::json!({"row": 3, "col": 0}));
}

#[test]
fn special_kinds_serialize_with_axis() {
    let line = serde_json::to_value(GameEvent::SpecialCreated {
        at: Coord::new(3, 2),
        kind: SpecialKind::LineClear(Axis::Horizontal),
    })
    .unwrap();
    assert_eq!(line["type"], "special_created");
    assert_eq!(line["kind"], serde_json::json!({"line_clear": "horizontal"}));

    let area = serde_json::to_value(SpecialKind::AreaClear).unwrap();
    assert_eq!(area, "area_clear");
}

#[test]
fn refill_tokens_are_plain_numbers() {
    let v = serde_json::to_value(GameEvent::TilesRefilled {
        column: 4,
        cells: vec![Coord::new(0, 4)],
        tokens: vec![TokenType(2)],
    })
    .unwrap();
    assert_eq!(v["tokens"], serde_json::json!([2]));
}

#[test]
fn session_event_log_roundtrips_through_json() {
    let grid = Grid::from_ascii(&["AAB", "CDA", "DCD"]).unwrap();
    let config = LevelConfig {
        level: 1,
        size: 3,
        palette: Palette::first(4),
        goal: 100,
        moves: 5,
    };
    let rng = SequenceRng::new(vec![1, 2, 3, 0]);
    let mut s = GameSession::with_grid(config, grid, rng).unwrap();
    s.request_swap(Coord::new(0, 2), Coord::new(1, 2)).unwrap();
    s.resolve_turn().unwrap();

    let events = s.drain_events();
    let json = serde_json::to_string(&events).unwrap();
    let back: Vec<GameEvent> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, events);

    let v: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(v[0]["type"], "board_initialized");
    assert_eq!(v[0]["board"]["size"], 3);
    assert_eq!(v[1]["type"], "swap_attempted");
    assert_eq!(v[1]["accepted"], true);
    let last = v.as_array().and_then(|a| a.last()).unwrap();
    assert_eq!(last["type"], "turn_ended");
    assert_eq!(last["reason"], "goal_reached");
}
