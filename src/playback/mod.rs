// src/playback/mod.rs

//! Plays the decoded walk: each state resolves to an animation asset that is
//! handed to a [`MediaPlayer`], in path order, until the path ends or the run
//! is cancelled.

pub mod animation;
pub mod player;
pub mod sequencer;
mod session;

pub use animation::AnimationMap;
pub use player::{CancelToken, CommandPlayer, MediaClip, MediaPlayer};
pub use sequencer::{CancelHandle, PlaybackReport, PlaybackSequencer, SequencerPhase};
pub use session::PlaybackSession;
