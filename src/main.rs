//! Tilemaker - interactive builder for Marquette dashboard tile files.
//!
//! Run with no arguments for the wizard; `tilemaker validate [FILE]` checks
//! an existing tile file.

mod tile;
mod wizard;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use tile::Tile;

/// Fixed output name; the dashboard loads this file from its working directory.
const TILE_FILE: &str = "tiles.json";

#[derive(Parser)]
#[command(name = "tilemaker")]
#[command(about = "Interactive builder for Marquette dashboard tiles", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a tile definition file
    Validate {
        /// Tile file to validate (default: tiles.json)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    // The wizard owns stdout, so we log to a file (use RUST_LOG env var to
    // control the level)
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open("tilemaker.log")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Mutex::new(log_file))
        .with_ansi(false) // No color codes in log file
        .init();

    let cli = Cli::parse();

    if let Some(Commands::Validate { file }) = cli.command {
        return validate_tiles(file);
    }

    run_wizard()
}

/// Run the interactive wizard against the real stdin/stdout.
fn run_wizard() -> Result<()> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut input = stdin.lock();
    let mut output = stdout.lock();

    let tiles = wizard::Wizard::new().run(&mut input, &mut output)?;
    wizard::finish(&tiles, &mut input, &mut output, Path::new(TILE_FILE))
}

fn validate_tiles(file: Option<PathBuf>) -> Result<()> {
    let path = file.unwrap_or_else(|| PathBuf::from(TILE_FILE));
    println!("Validating tile file: {:?}", path);

    let tiles = match load_tiles(&path) {
        Ok(tiles) => tiles,
        Err(e) => {
            eprintln!("✗ Failed to load tile file: {:#}", e);
            std::process::exit(1);
        }
    };

    println!("✓ Tile file loaded successfully");
    println!("  {} tiles defined", tiles.len());

    let mut errors = 0;
    let mut warnings = 0;

    for tile in &tiles {
        let (kind, title, topic) = match tile {
            Tile::Button {
                title,
                publish_topic,
                ..
            } => ("button", title, publish_topic),
            Tile::Text {
                title,
                subscribe_topic,
            } => ("text", title, subscribe_topic),
        };

        if topic.is_empty() {
            eprintln!("✗ Error: {} tile '{}' has an empty topic", kind, title);
            errors += 1;
        }
        if title.is_empty() {
            eprintln!("⚠ Warning: {} tile has an empty title", kind);
            warnings += 1;
        }
        if let Tile::Button {
            title,
            publish_payload,
            ..
        } = tile
        {
            if publish_payload.is_empty() {
                eprintln!(
                    "⚠ Warning: button tile '{}' publishes an empty payload",
                    title
                );
                warnings += 1;
            }
        }
    }

    // Summary
    if errors == 0 && warnings == 0 {
        println!("✓ Tile file is valid with no issues");
    } else {
        if errors > 0 {
            eprintln!("\n✗ Found {} error(s)", errors);
        }
        if warnings > 0 {
            println!("⚠ Found {} warning(s)", warnings);
        }
    }

    if errors > 0 {
        std::process::exit(1);
    }

    Ok(())
}

fn load_tiles(path: &Path) -> Result<Vec<Tile>> {
    let data =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
    let tiles =
        serde_json::from_str(&data).with_context(|| format!("Failed to parse {:?}", path))?;
    Ok(tiles)
}
