//! Application entry point for the organic growth viewer.
//!
//! This binary parses the command line, sets up logging and either runs
//! the simulation headless or delegates all interactive logic and
//! rendering to [`Viewer`] from the `viewer` module.

mod viewer;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use glam::Vec2;
use rand::{SeedableRng, rngs::StdRng};
use sim_core::{config::GrowthConfig, simulation::Simulation};
use tracing::info;
use tracing_subscriber::EnvFilter;
use viewer::Viewer;

/// Grows a spring-tensioned network of circles and lines.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// JSON file with growth parameters; missing fields use defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for the random source (random if omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Override the node budget
    #[arg(long)]
    max_nodes: Option<usize>,

    /// Override the per-tick branching probability
    #[arg(long)]
    growth_chance: Option<f32>,

    /// Run this many ticks without a window and print the final frame as JSON
    #[arg(long, value_name = "TICKS")]
    headless: Option<u64>,

    /// Print the effective growth parameters as JSON and exit
    #[arg(long)]
    dump_config: bool,

    /// Viewport width used to center the seed in headless mode
    #[arg(long, default_value_t = 800.0)]
    width: f32,

    /// Viewport height used to center the seed in headless mode
    #[arg(long, default_value_t = 600.0)]
    height: f32,
}

impl Cli {
    fn growth_config(&self) -> anyhow::Result<GrowthConfig> {
        let mut cfg = match &self.config {
            Some(path) => load_config(path)?,
            None => GrowthConfig::default(),
        };
        if let Some(max_nodes) = self.max_nodes {
            cfg.max_nodes = max_nodes;
        }
        if let Some(chance) = self.growth_chance {
            cfg.growth_chance = chance;
        }
        cfg.validate()?;
        Ok(cfg)
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

fn load_config(path: &Path) -> anyhow::Result<GrowthConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let cfg = GrowthConfig::from_json(&text)
        .with_context(|| format!("parsing config {}", path.display()))?;
    info!(path = %path.display(), "loaded growth config");
    Ok(cfg)
}

fn run_headless(cfg: GrowthConfig, rng: StdRng, ticks: u64, size: Vec2) -> anyhow::Result<()> {
    let mut sim = Simulation::new(cfg, rng)?;
    sim.initialize(size / 2.0);
    let mut frame = sim.frame();
    for _ in 0..ticks {
        frame = sim.step()?;
    }
    info!(
        ticks,
        nodes = frame.nodes.len(),
        segments = frame.segments.len(),
        "headless run finished"
    );
    println!("{}", serde_json::to_string_pretty(&frame)?);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cfg = cli.growth_config()?;
    if cli.dump_config {
        println!("{}", cfg.to_json());
        return Ok(());
    }

    let rng = cli.rng();

    if let Some(ticks) = cli.headless {
        return run_headless(cfg, rng, ticks, Vec2::new(cli.width, cli.height));
    }

    let viewer = Viewer::new(cfg, rng)?;
    eframe::run_native(
        "Organic Growth",
        eframe::NativeOptions::default(),
        Box::new(|_cc| Ok(Box::new(viewer))),
    )
    .map_err(|e| anyhow::anyhow!("eframe failed: {e}"))
}
