// Desktop host binary — window plumbing, CLI, and log setup.
#![allow(missing_docs)]

mod app;
mod config;
mod wallclock;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::config::EmulatorConfig;

#[derive(Parser)]
#[command(name = "face-emulator")]
#[command(about = "Analog watch face desktop emulator", long_about = None)]
#[command(version)]
struct Cli {
    /// Directory containing background.png, minute_hand.png, hour_hand.png
    #[arg(long, default_value = "assets")]
    assets: std::path::PathBuf,

    /// Initial window side length in logical pixels
    #[arg(long, default_value_t = 480)]
    size: u32,

    /// Fix the display density instead of following the window scale factor
    #[arg(long)]
    density: Option<f32>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = EmulatorConfig {
        assets_dir: cli.assets,
        window_size: cli.size,
        density_override: cli.density,
    };

    app::run(config).context("watch face emulator failed")
}
