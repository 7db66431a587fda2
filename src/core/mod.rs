// src/core/mod.rs

//! Core data structures and types

pub mod error;
pub mod state;

// Re-export public types for convenient access via `qwalk::core::TypeName`
pub use error::{
    ClbitId, PlaybackError, PlaybackResult, QubitId, SimResult, SimulationError, WalkError,
    WalkResult,
};
pub use state::StateVector;

pub mod constants;
pub use constants::qwalk_constants::{DEFAULT_N_STEPS, DEFAULT_SCALE, SHIFT_RY_ANGLE, WALK_QUBITS}; // Re-export
