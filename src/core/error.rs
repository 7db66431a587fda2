//! Identifiers and error handling logic

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Index of a qubit within a circuit's quantum register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QubitId(pub usize);

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

/// Index of a classical bit within a circuit's classical register.
/// Measurement results are reported with the highest classical bit leftmost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClbitId(pub usize);

impl fmt::Display for ClbitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

/// Failures raised by a simulation backend while executing a circuit.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum SimulationError {
    /// Circuit has no qubits to simulate.
    #[error("cannot simulate a circuit with an empty quantum register")]
    EmptyRegister,

    /// An operation references a qubit outside the circuit's register.
    #[error("{qubit} is outside the {num_qubits}-qubit register")]
    QubitOutOfRange {
        /// The offending qubit.
        qubit: QubitId,
        /// Size of the register.
        num_qubits: usize,
    },

    /// A measurement references a classical bit outside the circuit's register.
    #[error("{clbit} is outside the {num_clbits}-bit classical register")]
    ClbitOutOfRange {
        /// The offending classical bit.
        clbit: ClbitId,
        /// Size of the classical register.
        num_clbits: usize,
    },

    /// Control and target of a two-qubit gate are the same qubit.
    #[error("control and target cannot both be {0}")]
    DuplicateQubit(QubitId),

    /// An instruction block was applied to the wrong number of qubits.
    #[error("instruction '{name}' acts on {expected} qubits but was applied to {got}")]
    InstructionArity {
        /// Block name.
        name: String,
        /// Size of the block's local register.
        expected: usize,
        /// Number of qubits supplied.
        got: usize,
    },

    /// Shots must be at least 1.
    #[error("shots must be at least 1, got {0}")]
    InvalidShots(u32),

    /// State vector drifted away from unit norm.
    #[error("state vector is not normalized: sum(|c_i|^2) = {norm_sq}")]
    Unnormalized {
        /// Observed squared norm.
        norm_sq: f64,
    },

    /// The backend failed for a reason of its own.
    #[error("backend failure: {0}")]
    Backend(String),
}

/// Result type for simulation backends.
pub type SimResult<T> = Result<T, SimulationError>;

/// Fatal errors of the walk computation. Each carries the failing step.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum WalkError {
    /// A walk needs at least one step.
    #[error("n_steps must be at least 1, got {0}")]
    InvalidStepCount(usize),

    /// The simulation engine could not execute or return a step's circuit.
    #[error("simulation failed at step {step}: {source}")]
    Simulation {
        /// Index of the failing step.
        step: usize,
        /// Underlying backend error.
        #[source]
        source: SimulationError,
    },

    /// A raw outcome is not a 2-bit string.
    #[error("step {step} returned malformed outcome {outcome:?}")]
    Decode {
        /// Index of the failing step.
        step: usize,
        /// The raw outcome as returned by the backend.
        outcome: String,
    },

    /// Invalid walk or animation configuration.
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Result type for walk computation.
pub type WalkResult<T> = Result<T, WalkError>;

/// Errors reported by a media player. The sequencer treats all of them as non-fatal.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PlaybackError {
    /// The asset could not be opened or decoded.
    #[error("cannot open {}: {message}", path.display())]
    Open {
        /// Asset that failed to open.
        path: PathBuf,
        /// Player-supplied reason.
        message: String,
    },

    /// Playback started but the backend reported a failure.
    #[error("playback of {} failed: {message}", path.display())]
    Play {
        /// Asset that failed during playback.
        path: PathBuf,
        /// Player-supplied reason.
        message: String,
    },

    /// I/O error while driving the player.
    #[error("player I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for media player operations.
pub type PlaybackResult<T> = Result<T, PlaybackError>;
