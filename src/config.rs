// src/config.rs

//! Run configuration for the walk and the playback stage.

use crate::core::{DEFAULT_N_STEPS, DEFAULT_SCALE, WalkError, WalkResult};
use std::path::PathBuf;
use std::time::Duration;

/// How often a blocking player checks for cancellation.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Parameters of the walk computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkConfig {
    /// Number of steps in the path. Must be at least 1.
    pub n_steps: usize,
    /// Seed for the bundled simulator. `None` draws one from entropy.
    pub seed: Option<u64>,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            n_steps: DEFAULT_N_STEPS,
            seed: None,
        }
    }
}

impl WalkConfig {
    /// Rejects a zero step count.
    pub fn validate(&self) -> WalkResult<()> {
        if self.n_steps == 0 {
            return Err(WalkError::InvalidStepCount(self.n_steps));
        }
        Ok(())
    }
}

/// Parameters of the playback stage.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackConfig {
    /// Directory that animation filenames are resolved against.
    pub asset_dir: PathBuf,
    /// Optional wall-clock cap for the whole playback run, checked before
    /// each new asset. A clip that is already playing is never cut short.
    pub max_runtime: Option<Duration>,
    /// Window scale handed to the player.
    pub scale: f64,
    /// Cancellation polling interval for blocking players.
    pub poll_interval: Duration,
}

impl PlaybackConfig {
    /// Defaults for assets under `asset_dir`.
    pub fn new(asset_dir: impl Into<PathBuf>) -> Self {
        Self {
            asset_dir: asset_dir.into(),
            max_runtime: None,
            scale: DEFAULT_SCALE,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Sets the aggregate runtime cap.
    pub fn with_max_runtime(mut self, max_runtime: Duration) -> Self {
        self.max_runtime = Some(max_runtime);
        self
    }

    /// Sets the player window scale.
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Rejects non-positive scales and a zero poll interval.
    pub fn validate(&self) -> WalkResult<()> {
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(WalkError::Config(format!("scale must be positive, got {}", self.scale)));
        }
        if self.poll_interval.is_zero() {
            return Err(WalkError::Config("poll interval must be non-zero".to_string()));
        }
        Ok(())
    }
}
