//! Layout generator preview tool
//!
//! Generates one layout and prints it as text or JSON.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use log::{LevelFilter, info};

use lg_cli::preview;
use lg_core::{LayoutConfig, LayoutRng, generate};

/// Output format
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    /// One character per cell
    Text,
    /// Serialized layout
    Json,
}

/// Procedural room and hallway layout generator
#[derive(Parser, Debug)]
#[command(name = "layoutgen")]
#[command(author, version, about = "Generate and preview a level layout", long_about = None)]
struct Args {
    /// Seed for the random generator (random if omitted)
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,

    /// JSON configuration file (defaults if omitted)
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short = 'f', long = "format", value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    simplelog::TermLogger::init(
        level,
        simplelog::ConfigBuilder::new()
            .set_target_level(LevelFilter::Off)
            .set_location_level(LevelFilter::Off)
            .build(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )?;

    let config = match &args.config {
        Some(path) => LayoutConfig::load_from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => LayoutConfig::default(),
    };
    config.validate().context("invalid configuration")?;

    let mut rng = match args.seed {
        Some(seed) => LayoutRng::new(seed),
        None => LayoutRng::from_entropy(),
    };
    info!("seed {}", rng.seed());

    let layout = generate(&config, &mut rng).context("layout generation failed")?;

    match args.format {
        Format::Text => print!("{}", preview(&layout)),
        Format::Json => println!("{}", serde_json::to_string_pretty(&layout)?),
    }
    eprintln!("{}", layout.stats());
    Ok(())
}
