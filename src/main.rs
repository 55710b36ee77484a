//! Terminal Candy Swap runner (default binary).
//!
//! Uses crossterm for input and the framebuffer renderer for output. The
//! rules run in `candy_swap::core`; this loop only forwards keys, paces the
//! cascade and draws.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{error, info};

use candy_swap::input::{handle_key_event, should_quit};
use candy_swap::term::{BoardView, FrameBuffer, TerminalRenderer, Viewport};
use candy_swap::types::TICK_MS;
use candy_swap::{logging, AppConfig, Host};

fn main() -> Result<()> {
    let config = AppConfig::from_env();
    logging::init(config.log_path.as_deref())?;
    info!(?config, "starting");

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config);

    // Always try to restore terminal state.
    let _ = term.exit();
    if let Err(e) = &result {
        error!(error = %e, "exiting on error");
    }
    result
}

fn run(term: &mut TerminalRenderer, config: &AppConfig) -> Result<()> {
    let mut host = Host::new(config)?;
    let view = BoardView::default();
    let mut fb = FrameBuffer::new(0, 0);

    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        host.render_into(&view, Viewport::new(w, h), &mut fb);
        term.present(&mut fb)?;

        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        info!(score = host.session().score(), "quit");
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        host.apply(action)?;
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        let elapsed = last_tick.elapsed();
        if elapsed >= tick_duration {
            last_tick = Instant::now();
            host.tick(elapsed.as_millis().min(u32::MAX as u128) as u32)?;
        }
    }
}
