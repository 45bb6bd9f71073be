use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use planetfall_common::WorldConfig;
use planetfall_game::Game;
use planetfall_input::{InputFrame, InputState, Key, KeyBindings, RawEvent};
use planetfall_kernel::World;
use planetfall_tools::WorldInspector;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "planetfall-cli", about = "Headless runner for the planetfall sandbox")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// World configuration (JSON). Missing fields use the stock scene.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version, world summary and planets
    Info,
    /// Run frames with scripted input and print diagnostics
    Simulate {
        /// Number of frames to run
        #[arg(short, long, default_value = "120")]
        ticks: u64,
        /// Frame time in milliseconds
        #[arg(long, default_value = "16")]
        dt_ms: u64,
        /// Movement keys held for the whole run, e.g. "d" or "zq"
        #[arg(long, default_value = "")]
        hold: String,
        /// Press jump every N frames
        #[arg(long)]
        jump_every: Option<u64>,
        /// Print diagnostics every N frames
        #[arg(long, default_value = "30")]
        report_every: u64,
    },
    /// Run frames, then write the last rendered frame as PNG
    Snapshot {
        /// Number of frames to run before capturing
        #[arg(short, long, default_value = "1")]
        ticks: u64,
        /// Frame time in milliseconds
        #[arg(long, default_value = "16")]
        dt_ms: u64,
        /// Movement keys held for the whole run
        #[arg(long, default_value = "")]
        hold: String,
        /// Output file
        #[arg(short, long, default_value = "planetfall.png")]
        out: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .init();

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Info => {
            println!("planetfall-cli v{}", env!("CARGO_PKG_VERSION"));
            let world = World::new(&config)?;
            println!("{}", WorldInspector::summary(&world));
            for planet in WorldInspector::list_planets(&world) {
                println!("  {planet}");
            }
            println!(
                "viewport: {}x{} (internal {}x{})",
                config.viewport.width,
                config.viewport.height,
                config.viewport.internal_side(),
                config.viewport.internal_side()
            );
        }
        Commands::Simulate {
            ticks,
            dt_ms,
            hold,
            jump_every,
            report_every,
        } => {
            let mut game = Game::new(&config)?;
            let frame_time = Duration::from_millis(dt_ms);
            let frames = scripted_frames(&hold, jump_every, ticks);
            println!(
                "Simulating {ticks} frames at {dt_ms} ms (hold={hold:?}, jump_every={jump_every:?})"
            );

            for (i, input) in frames.into_iter().enumerate() {
                let frame = i as u64 + 1;
                let diagnostics = game.frame(&input, frame_time)?;
                if report_every > 0 && (frame % report_every == 0 || frame == ticks) {
                    println!("[{frame:>5}] {diagnostics}");
                }
                if !game.is_running() {
                    break;
                }
            }
            println!("{}", WorldInspector::summary(game.world()));
        }
        Commands::Snapshot {
            ticks,
            dt_ms,
            hold,
            out,
        } => {
            let mut game = Game::new(&config)?;
            let frames = scripted_frames(&hold, None, ticks);
            let last = game.run(frames, Duration::from_millis(dt_ms))?;
            if last.is_none() {
                game.draw();
            }
            write_png(game.renderer().frame(), &out)?;
            println!(
                "Wrote {} ({} blocks rendered, tick {})",
                out.display(),
                game.last_stats().blocks_rendered,
                game.world().tick()
            );
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> anyhow::Result<WorldConfig> {
    let Some(path) = path else {
        return Ok(WorldConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let config: WorldConfig =
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
    tracing::info!(path = %path.display(), planets = config.planets.len(), "config loaded");
    Ok(config)
}

/// Feed raw key events through the default bindings, one frame per tick.
fn scripted_frames(hold: &str, jump_every: Option<u64>, ticks: u64) -> Vec<InputFrame> {
    let mut input = InputState::new(KeyBindings::default());
    for c in hold.chars() {
        input.handle(RawEvent::KeyDown(Key::Char(c)));
    }
    (1..=ticks)
        .map(|tick| {
            if jump_every.is_some_and(|n| n > 0 && tick % n == 0) {
                input.handle(RawEvent::KeyDown(Key::Space));
                input.handle(RawEvent::KeyUp(Key::Space));
            }
            input.take_frame()
        })
        .collect()
}

fn write_png(surface: &planetfall_render::Surface, out: &Path) -> anyhow::Result<()> {
    let image =
        image::RgbaImage::from_raw(surface.width(), surface.height(), surface.to_rgba_bytes())
            .context("frame buffer size mismatch")?;
    image
        .save(out)
        .with_context(|| format!("writing {}", out.display()))?;
    Ok(())
}
