// src/walk/decoder.rs

//! Turns raw 2-bit measurement outcomes into walk states.
//!
//! Decoding is the identity on the bit pattern today. It stays a separate
//! step so the state labelling can change without touching how outcomes are
//! measured.

use crate::core::{WalkError, WalkResult};
use std::fmt;
use std::str::FromStr;

/// One of the four vertices of the 2-qubit walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WalkState {
    /// Outcome `"00"`.
    S00,
    /// Outcome `"01"`.
    S01,
    /// Outcome `"10"`.
    S10,
    /// Outcome `"11"`.
    S11,
}

impl WalkState {
    /// Every state, in outcome order.
    pub const ALL: [WalkState; 4] = [WalkState::S00, WalkState::S01, WalkState::S10, WalkState::S11];

    /// The bitstring this state was decoded from.
    pub fn as_str(&self) -> &'static str {
        match self {
            WalkState::S00 => "00",
            WalkState::S01 => "01",
            WalkState::S10 => "10",
            WalkState::S11 => "11",
        }
    }

    /// Position in [`WalkState::ALL`]; also the outcome read as a binary number.
    pub fn index(&self) -> usize {
        match self {
            WalkState::S00 => 0,
            WalkState::S01 => 1,
            WalkState::S10 => 2,
            WalkState::S11 => 3,
        }
    }
}

impl fmt::Display for WalkState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WalkState {
    type Err = WalkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_outcome(0, s)
    }
}

/// The decoded walk, one state per step, in step order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WalkPath {
    states: Vec<WalkState>,
}

impl WalkPath {
    /// Wraps already-decoded states.
    pub fn new(states: Vec<WalkState>) -> Self {
        Self { states }
    }

    /// States in step order.
    pub fn states(&self) -> &[WalkState] {
        &self.states
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// `true` if the path has no steps.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Iterates the states in step order.
    pub fn iter(&self) -> std::slice::Iter<'_, WalkState> {
        self.states.iter()
    }
}

impl<'a> IntoIterator for &'a WalkPath {
    type Item = &'a WalkState;
    type IntoIter = std::slice::Iter<'a, WalkState>;

    fn into_iter(self) -> Self::IntoIter {
        self.states.iter()
    }
}

impl FromIterator<WalkState> for WalkPath {
    fn from_iter<I: IntoIterator<Item = WalkState>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Arrow-joined path, e.g. `00 -> 01 -> 11`.
impl fmt::Display for WalkPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, state) in self.states.iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "{}", state)?;
        }
        Ok(())
    }
}

/// Decodes the outcome of step `step`. Anything but a 2-character string
/// over `{0, 1}` is a fatal decoding error.
pub fn decode_outcome(step: usize, raw: &str) -> WalkResult<WalkState> {
    match raw {
        "00" => Ok(WalkState::S00),
        "01" => Ok(WalkState::S01),
        "10" => Ok(WalkState::S10),
        "11" => Ok(WalkState::S11),
        _ => Err(WalkError::Decode { step, outcome: raw.to_string() }),
    }
}

/// Decodes an ordered sequence of raw outcomes; index `i` is step `i`.
pub fn decode<S: AsRef<str>>(outcomes: &[S]) -> WalkResult<WalkPath> {
    outcomes
        .iter()
        .enumerate()
        .map(|(step, raw)| decode_outcome(step, raw.as_ref()))
        .collect()
}
