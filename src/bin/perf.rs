//! Throughput check: random colored glyphs, full update + render per frame.
//!
//! Runs for a fixed time and reports iterations and average frame time.
//! `--headless` renders into memory, which isolates the engine from terminal
//! I/O.

use std::time::{Duration, Instant};

use anyhow::Result;
use clap::{Parser, ValueEnum};
use tracing::info;

use unitiles::core::{Engine, HeadlessSurface, Surface, SurfaceKind, Viewport};
use unitiles::demo::SimpleRng;
use unitiles::logging;
use unitiles::term::{TerminalSession, TerminalSurface};
use unitiles::types::Tile;

const GLYPHS: [char; 10] = ['☠', '☃', '⚙', '☻', '♞', '☭', '✈', '✟', '✂', '✯'];

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Kind {
    Retained,
    Immediate,
}

#[derive(Parser, Debug)]
#[command(name = "unitiles-perf", about = "Tile engine throughput test")]
struct Args {
    #[arg(long, default_value_t = 51)]
    width: u16,
    #[arg(long, default_value_t = 25)]
    height: u16,
    #[arg(long, default_value_t = 5)]
    seconds: u64,
    #[arg(long, value_enum, default_value_t = Kind::Retained)]
    surface: Kind,
    /// Render into memory instead of the terminal.
    #[arg(long)]
    headless: bool,
    #[arg(long, default_value = "unitiles-perf.log")]
    log: String,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let _log_guard = logging::init(&args.log)?;
    logging::install_panic_hook();

    let kind = match args.surface {
        Kind::Retained => SurfaceKind::Retained,
        Kind::Immediate => SurfaceKind::Immediate,
    };
    let duration = Duration::from_secs(args.seconds);

    let (iterations, elapsed) = if args.headless {
        let surface = HeadlessSurface::new(args.width, args.height, kind);
        run(surface, &args, duration)?
    } else {
        let mut session = TerminalSession::enter()?;
        let result = run(TerminalSurface::stdout(kind), &args, duration);
        let _ = session.exit();
        result?
    };

    let ms = elapsed.as_secs_f64() * 1000.0;
    let avg = if iterations == 0 { 0.0 } else { ms / iterations as f64 };
    info!(target: "perf", iterations, total_ms = ms, avg_ms = avg, "done");
    println!("Surface: {}", kind.as_str());
    println!("Iterations: {iterations} (in {ms:.0} ms)");
    println!("Average time: {avg:.3} ms");
    Ok(())
}

fn run<S: Surface>(surface: S, args: &Args, duration: Duration) -> Result<(u64, Duration)> {
    let viewport = Viewport::new(surface, args.width, args.height);
    let mut rng = SimpleRng::new(0x5eed);
    let mut engine = Engine::new(viewport, move |_, _| {
        let glyph = GLYPHS[rng.next_below(GLYPHS.len() as u32) as usize];
        let mut c = || rng.next_below(255) as u8;
        Tile::coloured(glyph, c(), c(), c())
    });

    let start = Instant::now();
    let mut iterations = 0u64;
    while start.elapsed() < duration {
        engine.update_origin()?;
        engine.viewport_mut().render()?;
        iterations += 1;
    }
    Ok((iterations, start.elapsed()))
}
