//! # VELO Runtime
//!
//! Entry point for the VELO binary.
//!
//! Loads the optional JSON configuration, applies command-line overrides and
//! runs the display loop either in a window or headless.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use velo::app;
use velo::config::AppConfig;

#[derive(Parser, Debug)]
#[command(name = "velo", version, about = "Velocity-level IK on a cooperative display loop")]
struct Args {
    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the DLS damping factor
    #[arg(long)]
    damping: Option<f64>,

    /// Frames to run in headless mode
    #[arg(long, default_value_t = 500)]
    frames: usize,

    /// Run without a window, on a fixed-step clock
    #[arg(long)]
    headless: bool,
}

/// How the display loop gets its input
enum ExecutionMode {
    Windowed,
    Headless { frames: usize },
}

impl ExecutionMode {
    fn from_args(args: &Args) -> Self {
        if args.headless || cfg!(not(feature = "window")) {
            ExecutionMode::Headless { frames: args.frames }
        } else {
            ExecutionMode::Windowed
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let mut config = AppConfig::load(args.config.as_deref())?;
    if let Some(damping) = args.damping {
        config.control.damping = damping;
    }

    let report = match ExecutionMode::from_args(&args) {
        ExecutionMode::Headless { frames } => app::run_headless(&config, frames)?,
        ExecutionMode::Windowed => app::run_windowed(&config)?,
    };

    let p = report.end.translation;
    tracing::info!(
        "Final end-effector position: ({:.4}, {:.4}, {:.4}) after {} steps",
        p.x,
        p.y,
        p.z,
        report.steps
    );
    Ok(())
}
