//! Host tests - key actions flowing through the host into a session

use candy_swap::engine::{Pacing, Tick};
use candy_swap::input::{Direction, HostAction};
use candy_swap::term::{BoardView, FrameBuffer, Viewport};
use candy_swap::types::{Coord, Phase};
use candy_swap::{AppConfig, Host};

fn config(seed: u32, pacing: Pacing) -> AppConfig {
    AppConfig {
        seed,
        level: 1,
        pacing,
        log_path: None,
    }
}

/// A host on a board that has at least one playable swap.
fn playable_host(pacing: Pacing) -> Host {
    let mut host = Host::new(&config(1, pacing)).unwrap();
    for seed in 2..64 {
        if host.session().hint().is_some() {
            break;
        }
        host = Host::new(&config(seed, pacing)).unwrap();
    }
    host
}

fn play_hint(host: &mut Host) {
    host.apply(HostAction::Hint).unwrap();
    let (a, b) = host.hint().unwrap();
    host.place_cursor(a);
    host.apply(HostAction::Select).unwrap();
    host.place_cursor(b);
    host.apply(HostAction::Select).unwrap();
}

#[test]
fn test_new_host_shows_mission() {
    let host = Host::new(&config(7, Pacing::Instant)).unwrap();
    assert_eq!(host.message(), Some("Score 1000 points in 25 moves!"));
    assert_eq!(host.cursor(), Coord::new(4, 4));
    assert_eq!(host.session().phase(), Phase::Idle);
}

#[test]
fn test_hint_swap_settles_on_next_tick() {
    let mut host = playable_host(Pacing::Instant);
    play_hint(&mut host);

    assert_eq!(host.session().phase(), Phase::CascadeResolving);
    assert_eq!(host.hint(), None);

    let tick = host.tick(16).unwrap();
    assert!(matches!(tick, Tick::Settled(Phase::Idle | Phase::Won)));
    assert!(host.session().score() > 0);
    assert_eq!(host.session().moves_remaining(), 24);
    assert_eq!(host.tick(16).unwrap(), Tick::Idle);
}

#[test]
fn test_paced_host_waits_for_swap_animation() {
    let mut host = playable_host(Pacing::Paced);
    play_hint(&mut host);

    assert_eq!(host.tick(100).unwrap(), Tick::Waiting { remaining_ms: 200 });
    let mut ticks = 0;
    loop {
        ticks += 1;
        assert!(ticks < 10_000, "paced cascade never settled");
        if let Tick::Settled(_) = host.tick(16).unwrap() {
            break;
        }
    }
    assert_eq!(host.session().moves_remaining(), 24);
}

#[test]
fn test_rejection_becomes_message() {
    let mut host = playable_host(Pacing::Instant);
    play_hint(&mut host);

    // The cascade is still pending until the next tick.
    host.apply(HostAction::Retry).unwrap();
    let msg = host.message().unwrap();
    assert!(msg.contains("cascade_resolving"), "unexpected message: {msg}");
    assert_eq!(host.session().attempt(), 0);
}

#[test]
fn test_next_level_requires_a_win() {
    let mut host = Host::new(&config(3, Pacing::Instant)).unwrap();
    host.apply(HostAction::NextLevel).unwrap();
    assert_eq!(host.session().level().level, 1);
    assert_eq!(host.message(), Some("Reach the goal first"));
}

#[test]
fn test_retry_starts_new_attempt() {
    let mut host = Host::new(&config(5, Pacing::Instant)).unwrap();
    host.apply(HostAction::Move(Direction::Up)).unwrap();
    host.apply(HostAction::Select).unwrap();
    assert_eq!(host.session().phase(), Phase::SwapPending);

    host.apply(HostAction::Retry).unwrap();
    assert_eq!(host.session().attempt(), 1);
    assert_eq!(host.session().phase(), Phase::Idle);
    assert_eq!(host.session().selected(), None);
    assert_eq!(host.message(), Some("Score 1000 points in 25 moves!"));
}

#[test]
fn test_cursor_moves_are_clamped() {
    let mut host = Host::new(&config(9, Pacing::Instant)).unwrap();
    for _ in 0..20 {
        host.apply(HostAction::Move(Direction::Left)).unwrap();
        host.apply(HostAction::Move(Direction::Up)).unwrap();
    }
    assert_eq!(host.cursor(), Coord::new(0, 0));
}

#[test]
fn test_render_marks_selection() {
    let mut host = Host::new(&config(11, Pacing::Instant)).unwrap();
    host.place_cursor(Coord::new(0, 0));
    let view = BoardView::default();
    let mut before = FrameBuffer::new(0, 0);
    host.render_into(&view, Viewport::new(18, 10), &mut before);

    host.apply(HostAction::Select).unwrap();
    let mut after = FrameBuffer::new(0, 0);
    host.render_into(&view, Viewport::new(18, 10), &mut after);

    assert_eq!(after.width(), 18);
    assert_eq!(before.get(1, 1).unwrap().ch, after.get(1, 1).unwrap().ch);
    assert_ne!(before.get(1, 1).unwrap().style.bg, after.get(1, 1).unwrap().style.bg);
}
