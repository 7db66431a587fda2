//! `qwalk` command-line entry point.
//!
//! Computes a quantum walk path, prints it, then plays the animation for
//! each visited state. Ctrl-C stops playback cleanly.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use qwalk::core::{DEFAULT_N_STEPS, DEFAULT_SCALE};
use qwalk::{
    AnimationMap, CommandPlayer, PlaybackConfig, PlaybackSequencer, Simulator, WalkConfig, WalkSimulator,
    WalkState,
};

/// Quantum walk animation player
#[derive(Parser, Debug)]
#[command(name = "qwalk", version)]
#[command(about = "Plays an animation sequence driven by a 2-qubit quantum walk")]
struct Args {
    /// Directory containing the animation assets
    #[arg(env = "QWALK_ASSET_DIR")]
    asset_dir: PathBuf,

    /// Number of walk steps
    #[arg(short = 'n', long, default_value_t = DEFAULT_N_STEPS)]
    steps: usize,

    /// Seed for the simulator (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Stop starting new animations after this many seconds
    #[arg(long, value_name = "SECS")]
    max_runtime: Option<f64>,

    /// Window scale passed to the player
    #[arg(long, default_value_t = DEFAULT_SCALE)]
    scale: f64,

    /// ffplay-compatible player program
    #[arg(long, default_value = "ffplay")]
    player: String,

    /// Asset for state 00
    #[arg(long = "asset-00", value_name = "FILE")]
    asset_00: Option<String>,

    /// Asset for state 01
    #[arg(long = "asset-01", value_name = "FILE")]
    asset_01: Option<String>,

    /// Asset for state 10
    #[arg(long = "asset-10", value_name = "FILE")]
    asset_10: Option<String>,

    /// Asset for state 11
    #[arg(long = "asset-11", value_name = "FILE")]
    asset_11: Option<String>,

    /// Print the path and exit without playing anything
    #[arg(long)]
    compute_only: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn animation_map(&self) -> AnimationMap {
        let overrides = [
            (WalkState::S00, &self.asset_00),
            (WalkState::S01, &self.asset_01),
            (WalkState::S10, &self.asset_10),
            (WalkState::S11, &self.asset_11),
        ];
        let mut map = AnimationMap::default();
        for (state, filename) in overrides {
            if let Some(filename) = filename {
                map.set_asset(state, filename.clone());
            }
        }
        map
    }

    fn playback_config(&self) -> Result<PlaybackConfig> {
        let mut config = PlaybackConfig::new(&self.asset_dir).with_scale(self.scale);
        if let Some(secs) = self.max_runtime {
            let cap = Duration::try_from_secs_f64(secs)
                .context("--max-runtime must be a non-negative number of seconds")?;
            config = config.with_max_runtime(cap);
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let walk_config = WalkConfig { n_steps: args.steps, seed: args.seed };
    walk_config.validate()?;
    let playback_config = args.playback_config()?;
    playback_config.validate()?;
    let animations = args.animation_map();
    animations.validate()?;

    println!("\nCalculating quantum walk path for {} steps...", walk_config.n_steps);
    let simulator = match walk_config.seed {
        Some(seed) => Simulator::with_seed(seed),
        None => Simulator::new(),
    };
    let n_steps = walk_config.n_steps;
    let path = tokio::task::spawn_blocking(move || WalkSimulator::new(simulator).compute_path(n_steps))
        .await?
        .context("quantum walk computation failed")?;

    println!("\nQuantum Walk Path:");
    println!("{}", path);
    println!("\nTotal steps: {}", path.len());

    if args.compute_only {
        return Ok(());
    }

    if !playback_config.asset_dir.is_dir() {
        warn!(dir = %playback_config.asset_dir.display(), "asset directory does not exist; every step will be skipped");
    }

    let player = Arc::new(CommandPlayer::with_program(
        args.player.clone(),
        playback_config.scale,
        playback_config.poll_interval,
    ));
    let sequencer = Arc::new(PlaybackSequencer::new(player, playback_config));

    let interrupt = sequencer.cancel_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupt received, stopping playback");
            interrupt.cancel();
        }
    });

    let runner = Arc::clone(&sequencer);
    let report = tokio::task::spawn_blocking(move || runner.run(&path, &animations)).await?;

    info!(
        attempted = report.attempted,
        played = report.played,
        failed = report.failed,
        skipped = report.skipped_missing,
        cancelled = report.cancelled,
        timed_out = report.timed_out,
        "done"
    );
    Ok(())
}
