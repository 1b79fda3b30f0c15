mod console;
mod render;
mod storage;

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{BufWriter, stdout};
use std::path::PathBuf;
use trail_game::GameEngine;

use console::{Console, LineSource, ScriptSource, StdinSource};
use storage::{FileLoader, FileStorage};

#[derive(Debug, Parser)]
#[command(name = "trail-console", version)]
#[command(about = "Lead a wagon party from Independence to the Willamette Valley")]
struct Args {
    /// Seed for every random stream (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Directory for the saved journey, the top ten and the tombstones
    #[arg(long, default_value = "westward-data")]
    data_dir: PathBuf,

    /// JSON file overriding the default tunables
    #[arg(long)]
    policy: Option<PathBuf>,

    /// Read input lines from this file instead of the keyboard
    #[arg(long)]
    script: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Milliseconds of answer time that make up one game tick
    #[arg(long, default_value_t = 250)]
    tick_ms: u32,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.no_color {
        colored::control::set_override(false);
    }

    let seed = args.seed.unwrap_or_else(rand::random);
    log::debug!("seed {seed}, data in {}", args.data_dir.display());

    let engine = GameEngine::new(
        FileLoader::new(args.policy.clone()),
        FileStorage::new(&args.data_dir),
    );
    let mut ctx = engine
        .create_context(seed)
        .context("loading policy and saved data")?;
    let mut nav = engine.start(&mut ctx).context("starting the main menu")?;

    let mut source: Box<dyn LineSource> = match &args.script {
        Some(path) => Box::new(ScriptSource::open(path)?),
        None => Box::new(StdinSource::new()),
    };

    let mut out = BufWriter::new(stdout().lock());
    render::banner(&mut out)?;
    let console = Console {
        engine: &engine,
        tick_ms: args.tick_ms,
    };
    let handled = console.run(&mut ctx, &mut nav, source.as_mut(), &mut out)?;
    log::debug!("handled {handled} lines over {} game ticks", ctx.game_ticks);
    Ok(())
}
