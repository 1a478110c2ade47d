//! # Delve Command Line Entry Point
//!
//! Builds a generation configuration from flags (and optionally a JSON file),
//! generates one dungeon and writes it in the text format.

use clap::Parser;
use delve::{format, DungeonGenerator, DungeonResult, GenerationConfig, OverlapBackend, Tile};
use log::info;
use std::io;
use std::path::PathBuf;

/// Command line arguments for the Delve dungeon generator.
#[derive(Parser, Debug)]
#[command(name = "delve")]
#[command(about = "Seeded room-and-corridor dungeon generation")]
#[command(version)]
struct Args {
    /// JSON file holding a generation configuration; flags override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Grid width in tiles
    #[arg(long)]
    width: Option<u32>,

    /// Grid height in tiles
    #[arg(long)]
    height: Option<u32>,

    /// Minimum number of room placement attempts
    #[arg(long)]
    min_rooms: Option<u32>,

    /// Maximum number of room placement attempts
    #[arg(long)]
    max_rooms: Option<u32>,

    /// Minimum room side length
    #[arg(long)]
    min_room_size: Option<u32>,

    /// Maximum room side length
    #[arg(long)]
    max_room_size: Option<u32>,

    /// Random seed for dungeon generation
    #[arg(short, long)]
    seed: Option<u64>,

    /// Overlap backend (linear, spatial-hash)
    #[arg(long)]
    backend: Option<OverlapBackend>,

    /// Write the dungeon here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> DungeonResult<()> {
    let args = Args::parse();

    initialize_logging(&args.log_level);

    info!("Starting Delve v{}", delve::VERSION);

    let config = build_config(&args)?;
    let generator = DungeonGenerator::new(config)?;

    match generator.config().seed {
        Some(seed) => info!("Generating dungeon with seed: {}", seed),
        None => info!("Generating dungeon with an unseeded RNG"),
    }

    let dungeon = generator.generate();
    let grid = dungeon.grid();
    info!(
        "{} rooms, {} floor tiles, {} corridor tiles",
        dungeon.rooms().len(),
        grid.count(Tile::Floor),
        grid.count(Tile::Corridor)
    );

    match &args.output {
        Some(path) => {
            format::save_to_file(grid, path)?;
            info!("Dungeon written to {}", path.display());
        }
        None => format::write_grid(grid, io::stdout().lock())?,
    }

    Ok(())
}

/// Initializes the logging system based on the specified log level.
///
/// `RUST_LOG` wins when it is set. Logs go to stderr so they never mix with
/// a grid written to stdout.
fn initialize_logging(log_level: &str) {
    let level = match log_level.to_lowercase().as_str() {
        "error" => log::LevelFilter::Error,
        "warn" => log::LevelFilter::Warn,
        "info" => log::LevelFilter::Info,
        "debug" => log::LevelFilter::Debug,
        "trace" => log::LevelFilter::Trace,
        _ => log::LevelFilter::Info,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_target(false)
        .init();
}

/// Starts from the config file (or defaults) and applies any explicit flags.
fn build_config(args: &Args) -> DungeonResult<GenerationConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            serde_json::from_str(&text)?
        }
        None => GenerationConfig::default(),
    };

    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    if let Some(min_rooms) = args.min_rooms {
        config.min_rooms = min_rooms;
    }
    if let Some(max_rooms) = args.max_rooms {
        config.max_rooms = max_rooms;
    }
    if let Some(min_room_size) = args.min_room_size {
        config.min_room_size = min_room_size;
    }
    if let Some(max_room_size) = args.max_room_size {
        config.max_room_size = max_room_size;
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(backend) = args.backend {
        config.backend = backend;
    }

    Ok(config)
}
