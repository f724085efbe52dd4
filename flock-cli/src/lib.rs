//! Headless flock driver: steps a simulation without a browser and records
//! the frames as JSON lines.

use anyhow::{bail, Context, Result};
use flock_core::{Bounds, FlockConfig, FlockSimulation};
use flock_shared::{FlockSettings, FlockStats, FrameSnapshot};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::Write;
use std::path::Path;

/// Frames between progress log lines.
const PROGRESS_INTERVAL: u64 = 100;

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub count: usize,
    pub width: f32,
    pub height: f32,
    pub frames: u64,
    /// Fixed seed for a reproducible starting flock; random when `None`.
    pub seed: Option<u64>,
    pub settings: FlockSettings,
    pub sample_every: u64,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            count: 100,
            width: 1280.0,
            height: 720.0,
            frames: 600,
            seed: None,
            settings: FlockSettings::default(),
            sample_every: 1,
        }
    }
}

pub fn load_settings(path: &Path) -> Result<FlockSettings> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings file {}", path.display()))?;
    FlockSettings::from_json(&json)
        .with_context(|| format!("Invalid settings in {}", path.display()))
}

pub fn build_flock(options: &RunOptions) -> Result<FlockSimulation<usize>> {
    let bounds = Bounds::new(options.width, options.height).context("Invalid domain size")?;
    let config = FlockConfig::from(options.settings);

    let flock = match options.seed {
        Some(seed) => {
            let mut rng = StdRng::seed_from_u64(seed);
            FlockSimulation::with_rng(0..options.count, bounds, config, &mut rng)
        }
        None => FlockSimulation::with_count(options.count, bounds, config),
    }
    .context("Invalid flock settings")?;

    Ok(flock)
}

/// Runs `options.frames` steps, writing frame 0 and every sampled frame to
/// `out`. Returns the statistics of the final frame.
pub fn run<W: Write>(options: &RunOptions, out: &mut W) -> Result<FlockStats> {
    if options.sample_every == 0 {
        bail!("sample interval must be at least 1 frame");
    }

    let mut flock = build_flock(options)?;
    log::info!(
        "Simulating {} agents in {}x{} for {} frames",
        flock.len(),
        options.width,
        options.height,
        options.frames
    );

    write_frame(out, &FrameSnapshot::capture(0, &flock))?;

    for frame in 1..=options.frames {
        flock.step();

        if frame % options.sample_every == 0 {
            write_frame(out, &FrameSnapshot::capture(frame, &flock))?;
        }

        if frame % PROGRESS_INTERVAL == 0 {
            let stats = FlockStats::measure(&flock);
            log::debug!(
                "frame {}: mean speed {:.3}, polarization {:.3}",
                frame,
                stats.mean_speed,
                stats.polarization
            );
        }
    }

    out.flush().context("Failed to flush output")?;

    let stats = FlockStats::measure(&flock);
    log::info!(
        "Done: mean speed {:.3}, top speed {:.3}, polarization {:.3}",
        stats.mean_speed,
        stats.top_speed,
        stats.polarization
    );

    Ok(stats)
}

fn write_frame<W: Write>(out: &mut W, snapshot: &FrameSnapshot) -> Result<()> {
    serde_json::to_writer(&mut *out, snapshot)
        .with_context(|| format!("Failed to write frame {}", snapshot.frame))?;
    out.write_all(b"\n")?;
    Ok(())
}
