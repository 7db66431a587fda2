// src/playback/sequencer.rs

//! Plays a walk path, one asset per state, and stops cleanly on cancellation.

use super::animation::AnimationMap;
use super::player::MediaPlayer;
use super::session::{PlaybackSession, RunState};
use crate::config::PlaybackConfig;
use crate::core::PlaybackResult;
use crate::walk::{WalkPath, WalkState};
use parking_lot::Mutex;
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Where a sequencer is in its single run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencerPhase {
    /// Constructed, not yet run.
    Idle,
    /// Logging the path before playback.
    Announcing,
    /// Between assets.
    Iterating,
    /// Blocked in a play call.
    Playing,
    /// Finished; display resources released.
    Terminated,
}

impl fmt::Display for SequencerPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SequencerPhase::Idle => "idle",
            SequencerPhase::Announcing => "announcing",
            SequencerPhase::Iterating => "iterating",
            SequencerPhase::Playing => "playing",
            SequencerPhase::Terminated => "terminated",
        };
        f.write_str(name)
    }
}

/// What a run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaybackReport {
    /// Path elements whose asset existed and was handed to the player.
    pub attempted: usize,
    /// Attempts that played to completion (or were stopped by cancellation).
    pub played: usize,
    /// Attempts the player reported as failed.
    pub failed: usize,
    /// Path elements skipped because the asset file is absent.
    pub skipped_missing: usize,
    /// The run ended because of cancellation.
    pub cancelled: bool,
    /// The run ended because the runtime cap elapsed.
    pub timed_out: bool,
}

struct Shared {
    player: Arc<dyn MediaPlayer>,
    state: RunState,
}

impl Shared {
    fn cancel(&self) {
        self.state.stop();
        if let Some(session) = self.state.take_session() {
            session.release();
        }
        self.release_display();
    }

    fn release_display(&self) {
        if self.state.claim_display_release() {
            self.player.release_display();
        }
    }
}

/// Cancels a sequencer from any thread.
#[derive(Clone)]
pub struct CancelHandle {
    shared: Arc<Shared>,
}

impl CancelHandle {
    /// Stops the run: closes the active clip, if any, releases display
    /// resources, and makes the run terminate at its next check.
    pub fn cancel(&self) {
        self.shared.cancel();
    }

    /// `true` once cancelled.
    pub fn is_cancelled(&self) -> bool {
        !self.shared.state.is_running()
    }
}

impl fmt::Debug for CancelHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CancelHandle").field("cancelled", &self.is_cancelled()).finish()
    }
}

/// Walks a [`WalkPath`] and plays the asset of each state in order.
///
/// Missing assets are skipped and player failures are logged; neither stops
/// the run. Cancellation is checked before each asset and is visible to the
/// player while it blocks. A sequencer runs once: after cancellation, `run`
/// returns immediately.
pub struct PlaybackSequencer {
    shared: Arc<Shared>,
    config: PlaybackConfig,
    phase: Mutex<SequencerPhase>,
}

impl PlaybackSequencer {
    /// Creates a sequencer in the `Idle` phase with `running = true`.
    pub fn new(player: Arc<dyn MediaPlayer>, config: PlaybackConfig) -> Self {
        Self {
            shared: Arc::new(Shared {
                player,
                state: RunState::new(),
            }),
            config,
            phase: Mutex::new(SequencerPhase::Idle),
        }
    }

    /// A handle for the interrupt source.
    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle {
            shared: Arc::clone(&self.shared),
        }
    }

    /// Same as [`CancelHandle::cancel`].
    pub fn cancel(&self) {
        self.shared.cancel();
    }

    /// Current phase.
    pub fn phase(&self) -> SequencerPhase {
        *self.phase.lock()
    }

    /// `true` while a clip is open.
    pub fn has_active_session(&self) -> bool {
        self.shared.state.has_active_session()
    }

    /// Playback configuration.
    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    fn enter(&self, phase: SequencerPhase) {
        *self.phase.lock() = phase;
    }

    /// Plays `path` through to the end, or until cancelled.
    pub fn run(&self, path: &WalkPath, animations: &AnimationMap) -> PlaybackReport {
        let mut report = PlaybackReport::default();

        self.enter(SequencerPhase::Announcing);
        info!(steps = path.len(), path = %path, "starting playback");

        self.enter(SequencerPhase::Iterating);
        let started = Instant::now();
        for (index, state) in path.iter().enumerate() {
            if !self.shared.state.is_running() {
                report.cancelled = true;
                break;
            }
            if let Some(cap) = self.config.max_runtime {
                if started.elapsed() >= cap {
                    info!(step = index, ?cap, "runtime cap reached, stopping playback");
                    report.timed_out = true;
                    break;
                }
            }

            let asset = self.config.asset_dir.join(animations.asset_for(*state));
            if !asset.exists() {
                debug!(step = index, state = %state, path = %asset.display(), "asset missing, skipping");
                report.skipped_missing += 1;
                continue;
            }

            report.attempted += 1;
            self.enter(SequencerPhase::Playing);
            match self.play_asset(index, *state, &asset) {
                Ok(()) => report.played += 1,
                Err(e) => {
                    warn!(step = index, state = %state, error = %e, "playback failed, continuing");
                    report.failed += 1;
                }
            }
            self.enter(SequencerPhase::Iterating);

            if !self.shared.state.is_running() {
                report.cancelled = true;
                break;
            }
        }

        self.terminate();
        info!(
            played = report.played,
            failed = report.failed,
            skipped = report.skipped_missing,
            cancelled = report.cancelled,
            "playback finished"
        );
        report
    }

    fn play_asset(&self, index: usize, state: WalkState, asset: &Path) -> PlaybackResult<()> {
        let clip = self.shared.player.open(asset)?;
        let session = Arc::new(PlaybackSession::new(asset.to_path_buf(), clip));
        self.shared.state.activate(Arc::clone(&session));
        debug!(step = index, state = %state, path = %asset.display(), "playing");

        // A cancel that landed between open and activate never saw this session.
        let outcome = if self.shared.state.is_running() {
            session.play(&self.shared.state.cancel_token())
        } else {
            Ok(())
        };

        self.shared.state.take_session();
        session.release();
        outcome
    }

    fn terminate(&self) {
        if let Some(session) = self.shared.state.take_session() {
            session.release();
        }
        self.shared.release_display();
        self.enter(SequencerPhase::Terminated);
    }
}

impl fmt::Debug for PlaybackSequencer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaybackSequencer")
            .field("phase", &self.phase())
            .field("config", &self.config)
            .finish()
    }
}
