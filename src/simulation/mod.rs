// src/simulation/mod.rs

//! Executes `qwalk::circuits::Circuit` values.
//!
//! The walk consumes a simulator only through the [`Backend`] and [`Job`]
//! traits: submit a circuit, then collect its measurement counts. [`Simulator`]
//! is the bundled state-vector implementation.

mod results;
pub(crate) mod engine;

pub use results::SimulationResult;

use crate::circuits::Circuit;
use crate::core::{SimResult, SimulationError};
use crate::validation::validate_state;
use engine::SimulationEngine;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::trace;

/// A handle to a submitted circuit.
pub trait Job {
    /// Backend-assigned job identifier, increasing in submission order.
    fn id(&self) -> u64;

    /// Blocks until the job finishes and returns its counts.
    fn result(self) -> SimResult<SimulationResult>;
}

/// Something that can execute circuits.
pub trait Backend {
    /// Handle type returned by [`Backend::submit`].
    type Job: Job;

    /// Human-readable backend name for logs.
    fn name(&self) -> &str;

    /// Queues `circuit` for `shots` executions.
    fn submit(&self, circuit: &Circuit, shots: u32) -> SimResult<Self::Job>;
}

/// The bundled state-vector simulator.
///
/// Each submitted job gets its own RNG stream derived from the simulator's
/// base seed and the job id, so a seeded simulator reproduces the same
/// outcomes for the same submission sequence regardless of when the jobs
/// are collected.
pub struct Simulator {
    base_seed: u64,
    next_job: AtomicU64,
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulator {
    /// Creates a simulator seeded from entropy.
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    /// Creates a reproducible simulator.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            base_seed: seed,
            next_job: AtomicU64::new(0),
        }
    }

    /// Runs `circuit` immediately with a fresh job stream.
    ///
    /// # Returns
    /// * `Ok(SimulationResult)` with one count per shot.
    /// * `Err(SimulationError)` for invalid circuits or shot counts.
    pub fn run(&self, circuit: &Circuit, shots: u32) -> SimResult<SimulationResult> {
        self.submit(circuit, shots)?.result()
    }

    fn job_seed(&self, id: u64) -> u64 {
        self.base_seed ^ id.wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
    }
}

impl Backend for Simulator {
    type Job = SimulatorJob;

    fn name(&self) -> &str {
        "statevector"
    }

    fn submit(&self, circuit: &Circuit, shots: u32) -> SimResult<SimulatorJob> {
        if shots == 0 {
            return Err(SimulationError::InvalidShots(shots));
        }
        if circuit.num_qubits() == 0 {
            return Err(SimulationError::EmptyRegister);
        }
        let id = self.next_job.fetch_add(1, Ordering::Relaxed);
        trace!(job = id, ops = circuit.len(), shots, "submitted circuit");
        Ok(SimulatorJob {
            id,
            circuit: circuit.clone(),
            shots,
            seed: self.job_seed(id),
        })
    }
}

/// A queued circuit on the bundled [`Simulator`]. Executes when
/// [`Job::result`] is called.
#[derive(Debug)]
pub struct SimulatorJob {
    id: u64,
    circuit: Circuit,
    shots: u32,
    seed: u64,
}

impl Job for SimulatorJob {
    fn id(&self) -> u64 {
        self.id
    }

    fn result(self) -> SimResult<SimulationResult> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        execute(&self.circuit, self.shots, &mut rng)
    }
}

/// Executes `circuit` `shots` times, each from a fresh `|0...0>`.
pub(crate) fn execute<R: Rng>(circuit: &Circuit, shots: u32, rng: &mut R) -> SimResult<SimulationResult> {
    let mut result = SimulationResult::new(shots);
    for _ in 0..shots {
        let mut engine = SimulationEngine::init(circuit.num_qubits(), circuit.num_clbits())?;
        for op in circuit.operations() {
            engine.apply_operation(op, rng)?;
        }
        validate_state(engine.state(), circuit.num_qubits(), None)?;
        if circuit.num_clbits() > 0 {
            result.record_shot(engine.bitstring());
        }
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::engine::SimulationEngine;
    use super::*;
    use crate::circuits::CircuitBuilder;
    use crate::core::{ClbitId, QubitId, StateVector};
    use crate::operations::Operation;
    use approx::assert_abs_diff_eq;
    use num_complex::Complex;
    use num_traits::Zero;
    use std::f64::consts::FRAC_1_SQRT_2;

    const TEST_TOLERANCE: f64 = 1e-9;

    fn q(i: usize) -> QubitId {
        QubitId(i)
    }

    fn assert_complex_vec_approx_equal(actual: &[Complex<f64>], expected: &[Complex<f64>], context: &str) {
        assert_eq!(actual.len(), expected.len(), "Vector length mismatch - {}", context);
        for i in 0..actual.len() {
            let dist_sq = (actual[i] - expected[i]).norm_sqr();
            assert!(
                dist_sq < TEST_TOLERANCE * TEST_TOLERANCE,
                "Vector mismatch at index {} - Actual: {}, Expected: {}, Context: {}",
                i, actual[i], expected[i], context
            );
        }
    }

    #[test]
    fn test_hadamard_on_both_qubits_is_uniform() -> Result<(), SimulationError> {
        let mut engine = SimulationEngine::init(2, 2)?;
        let mut rng = StdRng::seed_from_u64(7);
        engine.apply_operation(&Operation::Hadamard { target: q(0) }, &mut rng)?;
        engine.apply_operation(&Operation::Hadamard { target: q(1) }, &mut rng)?;
        for p in engine.state().probabilities() {
            assert_abs_diff_eq!(p, 0.25, epsilon = TEST_TOLERANCE);
        }
        Ok(())
    }

    #[test]
    fn test_cx_builds_bell_state() -> Result<(), SimulationError> {
        let mut engine = SimulationEngine::init(2, 2)?;
        let mut rng = StdRng::seed_from_u64(7);
        engine.apply_operation(&Operation::Hadamard { target: q(0) }, &mut rng)?;
        engine.apply_operation(&Operation::Cx { control: q(0), target: q(1) }, &mut rng)?;
        let h = Complex::new(FRAC_1_SQRT_2, 0.0);
        assert_complex_vec_approx_equal(
            engine.state().amplitudes(),
            &[h, Complex::zero(), Complex::zero(), h],
            "H(q0) then CX(q0, q1)",
        );
        Ok(())
    }

    #[test]
    fn test_s_gate_phase() -> Result<(), SimulationError> {
        let mut engine = SimulationEngine::init(1, 0)?;
        let mut rng = StdRng::seed_from_u64(7);
        engine.apply_operation(&Operation::Hadamard { target: q(0) }, &mut rng)?;
        engine.apply_operation(&Operation::S { target: q(0) }, &mut rng)?;
        assert_complex_vec_approx_equal(
            engine.state().amplitudes(),
            &[Complex::new(FRAC_1_SQRT_2, 0.0), Complex::new(0.0, FRAC_1_SQRT_2)],
            "S|+>",
        );
        Ok(())
    }

    #[test]
    fn test_ry_rotation() -> Result<(), SimulationError> {
        let mut engine = SimulationEngine::init(1, 0)?;
        let mut rng = StdRng::seed_from_u64(7);
        engine.apply_operation(&Operation::Ry { target: q(0), theta: std::f64::consts::PI }, &mut rng)?;
        let probs = engine.state().probabilities();
        assert_abs_diff_eq!(probs[1], 1.0, epsilon = TEST_TOLERANCE);
        Ok(())
    }

    #[test]
    fn test_measure_basis_state_is_deterministic() -> Result<(), SimulationError> {
        let mut engine = SimulationEngine::init(2, 2)?;
        let state = StateVector::from_amplitudes(vec![
            Complex::zero(),
            Complex::zero(),
            Complex::new(1.0, 0.0), // k = 2 -> q1 = 1, q0 = 0
            Complex::zero(),
        ])
        .unwrap();
        engine.set_state(state)?;
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(engine.measure(0, ClbitId(0), &mut rng)?, 0);
        assert_eq!(engine.measure(1, ClbitId(1), &mut rng)?, 1);
        assert_eq!(engine.bitstring(), "10");
        Ok(())
    }

    #[test]
    fn test_measure_collapses_entangled_partner() -> Result<(), SimulationError> {
        let mut engine = SimulationEngine::init(2, 2)?;
        let mut rng = StdRng::seed_from_u64(99);
        engine.apply_operation(&Operation::Hadamard { target: q(0) }, &mut rng)?;
        engine.apply_operation(&Operation::Cx { control: q(0), target: q(1) }, &mut rng)?;
        let first = engine.measure(0, ClbitId(0), &mut rng)?;
        let second = engine.measure(1, ClbitId(1), &mut rng)?;
        assert_eq!(first, second, "Bell pair outcomes must agree");
        assert_abs_diff_eq!(engine.state().norm_sqr(), 1.0, epsilon = TEST_TOLERANCE);
        Ok(())
    }

    #[test]
    fn test_counts_sum_to_shots() -> Result<(), SimulationError> {
        let circuit = CircuitBuilder::new(2, 2)
            .add_op(Operation::Hadamard { target: q(0) })
            .add_op(Operation::Hadamard { target: q(1) })
            .add_op(Operation::Measure { qubit: q(0), clbit: ClbitId(0) })
            .add_op(Operation::Measure { qubit: q(1), clbit: ClbitId(1) })
            .build();
        let result = Simulator::with_seed(3).run(&circuit, 200)?;
        assert_eq!(result.counts().values().sum::<u64>(), 200);
        assert!(result.counts().keys().all(|k| k.len() == 2));
        Ok(())
    }

    #[test]
    fn test_rejects_zero_shots_and_empty_register() {
        let sim = Simulator::with_seed(0);
        let circuit = CircuitBuilder::new(1, 1).build();
        assert_eq!(sim.submit(&circuit, 0).unwrap_err(), SimulationError::InvalidShots(0));
        assert_eq!(sim.submit(&Circuit::new(0, 0), 1).unwrap_err(), SimulationError::EmptyRegister);
    }

    #[test]
    fn test_out_of_range_qubit_is_reported() {
        let circuit = CircuitBuilder::new(2, 2)
            .add_op(Operation::Hadamard { target: q(5) })
            .build();
        match Simulator::with_seed(0).run(&circuit, 1) {
            Err(SimulationError::QubitOutOfRange { qubit, num_qubits }) => {
                assert_eq!(qubit, q(5));
                assert_eq!(num_qubits, 2);
            }
            other => panic!("expected QubitOutOfRange, got {:?}", other),
        }
    }

    #[test]
    fn test_job_ids_follow_submission_order() -> Result<(), SimulationError> {
        let sim = Simulator::with_seed(0);
        let circuit = CircuitBuilder::new(1, 1)
            .add_op(Operation::Measure { qubit: q(0), clbit: ClbitId(0) })
            .build();
        let a = sim.submit(&circuit, 1)?;
        let b = sim.submit(&circuit, 1)?;
        assert_eq!((a.id(), b.id()), (0, 1));
        // Collecting out of order is allowed.
        assert_eq!(b.result()?.single_outcome(), Some("0"));
        assert_eq!(a.result()?.single_outcome(), Some("0"));
        Ok(())
    }
}
