//! Dungeon demo runner (default binary).
//!
//! Walk the `@` around a small dungeon with the arrow keys, WASD or hjkl.
//! Field of view, torch lighting and the tile cache are toggled in
//! `unitiles.toml`. `q`, Esc or Ctrl-C quits.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::info;

use unitiles::config::{self, Config, SurfaceChoice};
use unitiles::core::SurfaceKind;
use unitiles::demo::DungeonDemo;
use unitiles::input::{is_quit, step_for, KeyState};
use unitiles::logging;
use unitiles::term::{TerminalSession, TerminalSurface};

#[derive(Parser, Debug)]
#[command(name = "unitiles", version, about = "Unicode tile dungeon demo")]
struct Args {
    /// Config file (default: ./unitiles.toml, then the platform config dir).
    #[arg(long = "config")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let cfg = config::load_from(args.config)?;
    let _log_guard = logging::init(&cfg.file.log.file)?;
    logging::install_panic_hook();
    info!(target: "runtime", config = ?cfg.file, "startup");

    let mut session = TerminalSession::enter()?;
    info!(target: "runtime", size = ?TerminalSession::size(), "terminal ready");
    let result = run(&cfg);

    // Always try to restore terminal state.
    let _ = session.exit();
    result
}

fn run(cfg: &Config) -> Result<()> {
    let kind = match cfg.file.render.surface {
        SurfaceChoice::Retained => SurfaceKind::Retained,
        SurfaceChoice::Immediate => SurfaceKind::Immediate,
    };
    let vp = &cfg.file.viewport;
    let mut game = DungeonDemo::new(
        TerminalSurface::stdout(kind),
        vp.width,
        vp.height,
        &cfg.file.engine,
    );

    let mut keys = KeyState::new();
    let tick = Duration::from_millis(cfg.file.render.tick_ms);
    let mut last_tick: Option<Instant> = None;

    loop {
        let timeout = last_tick
            .map(|t| tick.saturating_sub(t.elapsed()))
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind == KeyEventKind::Press && is_quit(&key) {
                        return Ok(());
                    }
                    keys.handle_event(&key, Instant::now());
                }
                Event::Resize(..) => game.engine_mut().viewport_mut().invalidate(),
                _ => {}
            }
        }

        if last_tick.is_some_and(|t| t.elapsed() < tick) {
            continue;
        }
        let now = Instant::now();
        last_tick = Some(now);

        keys.expire(now);
        let (mut dx, mut dy) = (0, 0);
        for code in keys.pressed() {
            if let Some((sx, sy)) = step_for(code) {
                dx += sx;
                dy += sy;
            }
        }
        // Diagonal blocked? Fall back to whichever axis is open.
        if !game.step(dx, dy) && !game.step(dx, 0) {
            game.step(0, dy);
        }

        game.frame()?;
        game.render()?;
    }
}
