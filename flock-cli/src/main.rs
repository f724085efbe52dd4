use anyhow::{Context, Result};
use clap::Parser;
use flock_cli::{load_settings, run, RunOptions};
use flock_shared::FlockSettings;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Run the flocking simulation headless", long_about = None)]
struct Args {
    /// Number of agents
    #[arg(short, long, default_value_t = 100)]
    count: usize,

    /// Domain width
    #[arg(long, default_value_t = 1280.0)]
    width: f32,

    /// Domain height
    #[arg(long, default_value_t = 720.0)]
    height: f32,

    /// Number of frames to simulate
    #[arg(short, long, default_value_t = 600)]
    frames: u64,

    /// Seed for the initial flock (random if omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON settings file (maxSpeed, maxForce, perceptionRadius, ...)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Write frames here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Only record every k-th frame
    #[arg(long, default_value_t = 1)]
    sample_every: u64,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.debug {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }

    let settings = match &args.settings {
        Some(path) => {
            log::info!("Loading settings from {}", path.display());
            load_settings(path)?
        }
        None => FlockSettings::default(),
    };

    let options = RunOptions {
        count: args.count,
        width: args.width,
        height: args.height,
        frames: args.frames,
        seed: args.seed,
        settings,
        sample_every: args.sample_every,
    };

    let mut out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    run(&options, &mut out).context("Simulation failed")?;

    Ok(())
}
