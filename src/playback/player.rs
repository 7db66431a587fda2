// src/playback/player.rs

//! Media player contracts and the bundled external-process player.

use crate::core::{PlaybackError, PlaybackResult};
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, trace};

/// Shared view of the sequencer's running flag, handed to blocking play calls.
#[derive(Debug, Clone)]
pub struct CancelToken {
    running: Arc<AtomicBool>,
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

impl CancelToken {
    /// A fresh, not-cancelled token.
    pub fn new() -> Self {
        Self::from_flag(Arc::new(AtomicBool::new(true)))
    }

    pub(crate) fn from_flag(running: Arc<AtomicBool>) -> Self {
        Self { running }
    }

    /// `true` once cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        !self.running.load(Ordering::SeqCst)
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.running.store(false, Ordering::SeqCst);
    }
}

/// Opens media assets.
pub trait MediaPlayer: Send + Sync {
    /// Prepares `path` for playback. Fails if the asset cannot be read or decoded.
    fn open(&self, path: &Path) -> PlaybackResult<Arc<dyn MediaClip>>;

    /// Releases windows or other display resources held by the backend.
    fn release_display(&self);
}

/// An opened asset.
pub trait MediaClip: Send + Sync {
    /// Plays to completion, blocking. Must return early once `cancel` is
    /// cancelled or [`MediaClip::close`] is called.
    fn play(&self, cancel: &CancelToken) -> PlaybackResult<()>;

    /// Releases every resource of the clip. Safe to call more than once,
    /// after a failure, or from another thread while `play` is blocked.
    fn close(&self);
}

/// Plays assets by running an external program, one process per asset.
///
/// The asset path is appended after `args`. The process is polled every
/// `poll_interval`; cancellation or `close` kills it.
#[derive(Debug, Clone)]
pub struct CommandPlayer {
    program: String,
    args: Vec<String>,
    poll_interval: Duration,
}

impl CommandPlayer {
    /// Runs `program args... <asset>` for every asset.
    pub fn new(program: impl Into<String>, args: Vec<String>, poll_interval: Duration) -> Self {
        Self {
            program: program.into(),
            args,
            poll_interval,
        }
    }

    /// `ffplay` in a window scaled by `scale`, exiting at the end of the clip.
    pub fn ffplay(scale: f64, poll_interval: Duration) -> Self {
        Self::with_program("ffplay", scale, poll_interval)
    }

    /// Like [`CommandPlayer::ffplay`] with an ffplay-compatible binary at `program`.
    pub fn with_program(program: impl Into<String>, scale: f64, poll_interval: Duration) -> Self {
        let args = vec![
            "-autoexit".to_string(),
            "-loglevel".to_string(),
            "quiet".to_string(),
            "-vf".to_string(),
            format!("scale=iw*{scale}:ih*{scale}"),
        ];
        Self::new(program, args, poll_interval)
    }

    /// Program that will be spawned.
    pub fn program(&self) -> &str {
        &self.program
    }
}

impl MediaPlayer for CommandPlayer {
    fn open(&self, path: &Path) -> PlaybackResult<Arc<dyn MediaClip>> {
        if !path.is_file() {
            return Err(PlaybackError::Open {
                path: path.to_path_buf(),
                message: "not a readable file".to_string(),
            });
        }
        Ok(Arc::new(CommandClip {
            path: path.to_path_buf(),
            program: self.program.clone(),
            args: self.args.clone(),
            poll_interval: self.poll_interval,
            child: Mutex::new(None),
            closed: AtomicBool::new(false),
        }))
    }

    fn release_display(&self) {
        // Each clip owns its player window; closing the clip closes the window.
        debug!(program = %self.program, "display resources released");
    }
}

struct CommandClip {
    path: PathBuf,
    program: String,
    args: Vec<String>,
    poll_interval: Duration,
    child: Mutex<Option<Child>>,
    closed: AtomicBool,
}

impl CommandClip {
    fn play_error(&self, message: String) -> PlaybackError {
        PlaybackError::Play { path: self.path.clone(), message }
    }
}

impl MediaClip for CommandClip {
    fn play(&self, cancel: &CancelToken) -> PlaybackResult<()> {
        if self.closed.load(Ordering::SeqCst) || cancel.is_cancelled() {
            return Ok(());
        }

        let child = Command::new(&self.program)
            .args(&self.args)
            .arg(&self.path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| PlaybackError::Open {
                path: self.path.clone(),
                message: format!("failed to start {}: {}", self.program, e),
            })?;
        trace!(pid = child.id(), path = %self.path.display(), "player process started");
        *self.child.lock() = Some(child);

        loop {
            {
                let mut guard = self.child.lock();
                let Some(child) = guard.as_mut() else {
                    // Closed from another thread.
                    return Ok(());
                };
                if let Some(status) = child.try_wait()? {
                    guard.take();
                    return if status.success() {
                        Ok(())
                    } else {
                        Err(self.play_error(format!("{} exited with {}", self.program, status)))
                    };
                }
            }
            if cancel.is_cancelled() || self.closed.load(Ordering::SeqCst) {
                self.close();
                return Ok(());
            }
            std::thread::sleep(self.poll_interval);
        }
    }

    fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
        if let Some(mut child) = self.child.lock().take() {
            // The process may already have exited; both calls are best effort.
            let _ = child.kill();
            let _ = child.wait();
            trace!(path = %self.path.display(), "player process stopped");
        }
    }
}

impl Drop for CommandClip {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_cancel_token() {
        let token = CancelToken::new();
        assert!(!token.is_cancelled());
        let clone = token.clone();
        clone.cancel();
        assert!(token.is_cancelled());
    }

    #[test]
    fn test_open_missing_file_fails() {
        let player = CommandPlayer::ffplay(0.5, Duration::from_millis(10));
        let err = player.open(Path::new("/definitely/not/here.mp4")).err();
        assert!(matches!(err, Some(PlaybackError::Open { .. })));
    }

    #[test]
    fn test_ffplay_arguments_carry_scale() {
        let player = CommandPlayer::ffplay(0.5, Duration::from_millis(10));
        assert_eq!(player.program(), "ffplay");
        assert!(player.args.contains(&"scale=iw*0.5:ih*0.5".to_string()));
        assert!(player.args.contains(&"-autoexit".to_string()));
    }

    #[cfg(unix)]
    #[test]
    fn test_exit_status_maps_to_result() -> Result<(), Box<dyn std::error::Error>> {
        let asset = tempfile::NamedTempFile::new()?;
        let ok = CommandPlayer::new("true", Vec::new(), Duration::from_millis(5));
        ok.open(asset.path())?.play(&CancelToken::new())?;

        let failing = CommandPlayer::new("false", Vec::new(), Duration::from_millis(5));
        let clip = failing.open(asset.path())?;
        assert!(matches!(clip.play(&CancelToken::new()), Err(PlaybackError::Play { .. })));
        clip.close();
        clip.close();
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_cancellation_stops_long_playback() -> Result<(), Box<dyn std::error::Error>> {
        let asset = tempfile::NamedTempFile::new()?;
        let player = CommandPlayer::new(
            "sh",
            vec!["-c".to_string(), "sleep 10".to_string(), "sh".to_string()],
            Duration::from_millis(5),
        );
        let clip = player.open(asset.path())?;
        let token = CancelToken::new();
        let canceller = token.clone();
        let started = Instant::now();
        let handle = std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(100));
            canceller.cancel();
        });
        clip.play(&token)?;
        handle.join().expect("canceller thread panicked");
        assert!(started.elapsed() < Duration::from_secs(5));
        Ok(())
    }
}
