//! Terminal runner (default binary).
//!
//! Reads `BLOCKFALL_*` configuration, logs to a file (the terminal belongs to
//! the game), then renders, polls keys and ticks gravity until the player quits.

use std::fs::File;
use std::io;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{info, warn, Level};
use tracing_subscriber::EnvFilter;

use blockfall::config::AppConfig;
use blockfall::core::GameController;
use blockfall::input::{map_key, should_quit};
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use blockfall::types::FRAME_MS;

fn main() -> Result<()> {
    let config = AppConfig::from_env().context("reading BLOCKFALL_* configuration")?;
    init_logging(&config);

    let settings = config.settings();
    info!(
        width = settings.width,
        height = settings.height,
        seed = settings.seed,
        policy = ?settings.rotation_policy,
        "starting"
    );
    let game = GameController::new(settings).context("creating the game")?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, game);

    // Always try to restore terminal state.
    if let Err(e) = term.exit() {
        warn!(error = %e, "failed to restore terminal");
    }
    result
}

/// Log to the configured file; if it cannot be opened, logging is discarded.
fn init_logging(config: &AppConfig) {
    let filter = EnvFilter::from_default_env().add_directive(Level::INFO.into());
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_ansi(false);

    match File::create(&config.log_path) {
        Ok(file) => builder.with_writer(Mutex::new(file)).init(),
        Err(_) => builder.with_writer(io::sink).init(),
    }
}

fn run(term: &mut TerminalRenderer, mut game: GameController) -> Result<()> {
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);

    let start = Instant::now();
    let frame_duration = Duration::from_millis(FRAME_MS);

    loop {
        let frame_start = Instant::now();

        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&game.frame(), Viewport::new(w, h), &mut fb);
        term.draw(&fb)?;

        // Input until the next frame is due.
        while let Some(timeout) = frame_duration.checked_sub(frame_start.elapsed()) {
            if !event::poll(timeout)? {
                break;
            }
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        info!(
                            episode = game.episode(),
                            lines = game.lines_cleared(),
                            "quit"
                        );
                        return Ok(());
                    }
                    if let Some(command) = map_key(key) {
                        game.apply_command(command);
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        game.tick(start.elapsed().as_millis() as u64);
    }
}
