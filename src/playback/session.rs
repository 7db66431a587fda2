// src/playback/session.rs

use super::player::{CancelToken, MediaClip};
use parking_lot::Mutex;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::trace;

/// One playing asset. Closing goes through [`PlaybackSession::release`],
/// which closes the clip at most once no matter how many paths call it.
pub struct PlaybackSession {
    asset_path: PathBuf,
    clip: Arc<dyn MediaClip>,
    start_time: Instant,
    released: AtomicBool,
}

impl PlaybackSession {
    pub(crate) fn new(asset_path: PathBuf, clip: Arc<dyn MediaClip>) -> Self {
        Self {
            asset_path,
            clip,
            start_time: Instant::now(),
            released: AtomicBool::new(false),
        }
    }

    /// Asset being played.
    pub fn asset_path(&self) -> &Path {
        &self.asset_path
    }

    /// When the session was opened.
    pub fn start_time(&self) -> Instant {
        self.start_time
    }

    /// `true` once the clip has been closed.
    pub fn is_released(&self) -> bool {
        self.released.load(Ordering::SeqCst)
    }

    pub(crate) fn play(&self, cancel: &CancelToken) -> crate::core::PlaybackResult<()> {
        self.clip.play(cancel)
    }

    /// Closes the clip. Returns `true` only for the call that actually closed it.
    pub fn release(&self) -> bool {
        if self.released.swap(true, Ordering::AcqRel) {
            return false;
        }
        self.clip.close();
        trace!(
            path = %self.asset_path.display(),
            elapsed_ms = self.start_time.elapsed().as_millis() as u64,
            "session released"
        );
        true
    }
}

impl Drop for PlaybackSession {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for PlaybackSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaybackSession")
            .field("asset_path", &self.asset_path)
            .field("released", &self.is_released())
            .finish()
    }
}

/// State shared by the sequencer's run path and its cancellation path.
#[derive(Debug)]
pub(crate) struct RunState {
    running: Arc<AtomicBool>,
    active_session: Mutex<Option<Arc<PlaybackSession>>>,
    display_released: AtomicBool,
}

impl RunState {
    pub(crate) fn new() -> Self {
        Self {
            running: Arc::new(AtomicBool::new(true)),
            active_session: Mutex::new(None),
            display_released: AtomicBool::new(false),
        }
    }

    pub(crate) fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    pub(crate) fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    pub(crate) fn cancel_token(&self) -> CancelToken {
        CancelToken::from_flag(Arc::clone(&self.running))
    }

    pub(crate) fn activate(&self, session: Arc<PlaybackSession>) {
        *self.active_session.lock() = Some(session);
    }

    /// Removes the active session, if any. Whoever takes it releases it.
    pub(crate) fn take_session(&self) -> Option<Arc<PlaybackSession>> {
        self.active_session.lock().take()
    }

    pub(crate) fn has_active_session(&self) -> bool {
        self.active_session.lock().is_some()
    }

    /// `true` for the first caller only.
    pub(crate) fn claim_display_release(&self) -> bool {
        !self.display_released.swap(true, Ordering::AcqRel)
    }
}
