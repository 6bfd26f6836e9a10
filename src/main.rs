//! Terminal falling-block game (default binary).
//!
//! Renders every frame, polls input until the next frame or gravity tick is
//! due and feeds wall-clock time to the session's gravity timer.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{debug, info};

use tui_blockfall::config::Config;
use tui_blockfall::core::{GameSession, GameSnapshot};
use tui_blockfall::input::{handle_key_event, should_quit};
use tui_blockfall::logging::init_logging;
use tui_blockfall::term::{FrameBuffer, GameView, Scene, TerminalRenderer, Viewport};
use tui_blockfall::types::FRAME_MS;

fn main() -> Result<()> {
    let config = Config::from_env()?;
    init_logging(&config)?;
    info!(seed = config.seed, rules = ?config.rules, "starting");

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, config: &Config) -> Result<()> {
    let mut session = GameSession::new(config.seed, config.rules);
    session.start();

    // Reused every frame.
    let view = GameView::default().with_cell_size_px(config.cell_size_px);
    let mut snap = GameSnapshot::default();
    let mut scene = Scene::new(config.cell_size_px);
    let mut fb = FrameBuffer::new(0, 0);

    let frame = Duration::from_millis(FRAME_MS);
    let mut clock = Instant::now();

    loop {
        let frame_start = Instant::now();

        // Render.
        session.snapshot_into(&mut snap);
        scene.rebuild(&snap);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_scene_into(&scene, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input until the next frame or gravity tick, whichever comes first.
        let mut timeout = frame.saturating_sub(frame_start.elapsed());
        if let Some(ms) = session.timer().until_next_tick_ms() {
            timeout = timeout.min(Duration::from_millis(ms));
        }
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        info!(score = session.score(), "quit");
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        session.apply_action(action);
                        log_lock_event(&mut session);
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Gravity. Whole milliseconds only; the remainder carries over.
        let elapsed_ms = clock.elapsed().as_millis() as u64;
        clock += Duration::from_millis(elapsed_ms);
        session.advance(elapsed_ms);
        log_lock_event(&mut session);
    }
}

/// Drain the session's lock event, if any, into the log.
fn log_lock_event(session: &mut GameSession) {
    let Some(event) = session.take_last_event() else {
        return;
    };
    if event.rows_cleared > 0 {
        debug!(
            rows = event.rows_cleared,
            gained = event.score_gained,
            "rows cleared"
        );
    }
    if event.game_over {
        info!(
            score = session.score(),
            lines = session.lines(),
            "GAME OVER"
        );
    }
}
