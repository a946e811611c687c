//! Torus Flock entry point
//!
//! Builds a board from flags (or a JSON config), runs the requested ticks and
//! prints the board before and after.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use torus_flock::consts::DEFAULT_TICKS;
use torus_flock::{Board, Isolation, SimConfig, Weighting};

#[derive(Parser, Debug)]
#[command(author, version, about = "Flocking birds on a toroidal grid", long_about = None)]
struct Args {
    /// JSON config file; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Board rows
    #[arg(short, long)]
    rows: Option<usize>,

    /// Board columns
    #[arg(short = 'C', long)]
    cols: Option<usize>,

    /// Birds placed at random cells
    #[arg(short, long)]
    birds: Option<usize>,

    /// Blocks placed at random cells
    #[arg(short = 'k', long)]
    blocks: Option<usize>,

    /// Cells a bird advances per tick
    #[arg(short, long)]
    speed: Option<f64>,

    /// RNG seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Ticks to simulate
    #[arg(short, long, default_value_t = DEFAULT_TICKS)]
    ticks: u64,

    /// Also print the board every N ticks (0 disables)
    #[arg(short, long, default_value_t = 0)]
    every: u64,

    /// Offset combination: 'unweighted' or 'influence'
    #[arg(short, long)]
    weighting: Option<String>,

    /// Lone-bird policy: 'keep' or 'reset'
    #[arg(short, long)]
    isolation: Option<String>,

    /// Print occupant records as JSON instead of the text grid
    #[arg(short, long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    /// Merge flags over the config file (or defaults)
    fn to_config(&self) -> Result<SimConfig> {
        let mut config = match &self.config {
            Some(path) => SimConfig::load(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => SimConfig::default(),
        };

        if let Some(rows) = self.rows {
            config.rows = rows;
        }
        if let Some(cols) = self.cols {
            config.cols = cols;
        }
        if let Some(birds) = self.birds {
            config.birds = birds;
        }
        if let Some(blocks) = self.blocks {
            config.blocks = blocks;
        }
        if let Some(speed) = self.speed {
            config.speed = speed;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if let Some(name) = &self.weighting {
            config.weighting = Weighting::from_str(name)
                .with_context(|| format!("Unknown weighting '{name}' (expected unweighted or influence)"))?;
        }
        if let Some(name) = &self.isolation {
            config.isolation = Isolation::from_str(name)
                .with_context(|| format!("Unknown isolation policy '{name}' (expected keep or reset)"))?;
        }

        config.validate().context("Invalid simulation settings")?;
        Ok(config)
    }
}

fn print_board(board: &Board, json: bool) -> Result<()> {
    if json {
        let snapshot = serde_json::to_string(&board.snapshot()).context("Failed to encode board")?;
        println!("{snapshot}");
    } else {
        println!("{board}");
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
    log::info!("Torus Flock starting...");

    let config = args.to_config()?;
    let mut board = Board::from_config(&config).context("Failed to build board")?;
    log::info!(
        "Simulating {} ticks ({} weighting, {} isolation)",
        args.ticks,
        config.weighting.as_str(),
        config.isolation.as_str()
    );

    print_board(&board, args.json)?;
    for _ in 0..args.ticks {
        board.tick();
        if args.every > 0 && board.tick_count() % args.every == 0 && board.tick_count() < args.ticks {
            log::info!("tick {}", board.tick_count());
            print_board(&board, args.json)?;
        }
    }
    print_board(&board, args.json)?;

    log::info!("Done after {} ticks", board.tick_count());
    Ok(())
}
