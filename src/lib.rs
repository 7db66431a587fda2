// src/lib.rs

//! `qwalk` - A discrete-time quantum walk that drives an animation sequence
//!
//! The walk runs on a fixed 2-qubit register. Each step's circuit is
//! composed from scratch (coin at step 0, the shift operator `step + 1`
//! times), simulated for one shot, and the 2-bit outcome becomes the walk
//! state for that step. The resulting path is then played back as a
//! sequence of media assets, one per state, with clean cancellation.

pub mod core;
pub mod operations;
pub mod circuits;
pub mod simulation;
pub mod validation;
pub mod walk;
pub mod playback;
pub mod config;

// Re-export the most common types for easier top-level use
pub use core::{ClbitId, PlaybackError, QubitId, SimulationError, StateVector, WalkError};
pub use operations::{Instruction, Operation};
pub use circuits::{Circuit, CircuitBuilder};
pub use simulation::{Backend, Job, SimulationResult, Simulator};
pub use walk::{WalkPath, WalkSimulator, WalkState, WalkStep};
pub use playback::{
    AnimationMap, CancelHandle, CancelToken, CommandPlayer, MediaClip, MediaPlayer, PlaybackReport,
    PlaybackSequencer,
};
pub use config::{PlaybackConfig, WalkConfig};
pub use validation::{check_normalization, validate_state};

// Example 1: Computing a walk path
// Every step yields one of the four 2-bit states, and the path always has
// exactly as many states as requested steps.
/// ```
/// use qwalk::{Simulator, WalkSimulator, WalkState, WalkError};
///
/// let walk = WalkSimulator::new(Simulator::with_seed(42));
/// let path = walk.compute_path(10)?;
///
/// println!("Quantum Walk Path:\n{}", path);
/// assert_eq!(path.len(), 10);
/// assert!(path.iter().all(|s| WalkState::ALL.contains(s)));
/// # Ok::<(), WalkError>(())
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item

// Example 2: Inspecting a step circuit
// Step 3 has no coin and applies the shift block four times before measuring.
/// ```
/// use qwalk::walk::{build_coin_operator, build_shift_operator, build_step_circuit, WalkStep};
/// use qwalk::walk::factory::{COIN_NAME, SHIFT_NAME};
///
/// let circuit = build_step_circuit(WalkStep::new(3), &build_coin_operator(), &build_shift_operator());
/// println!("{}", circuit);
/// assert_eq!(circuit.count_instruction(COIN_NAME), 0);
/// assert_eq!(circuit.count_instruction(SHIFT_NAME), 4);
/// assert_eq!(circuit.count_measurements(), 2);
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item
