// src/walk/mod.rs

//! Computes the quantum walk path.
//!
//! Every step `k` gets its own circuit, composed from scratch: the coin at
//! step 0 only, then the shift operator `k + 1` times, then a measurement of
//! both qubits. Each circuit is run for a single shot, and the outcomes are
//! decoded into a [`WalkPath`] in step order.

pub mod decoder;
pub mod factory;

pub use decoder::{decode, decode_outcome, WalkPath, WalkState};
pub use factory::{build_coin_operator, build_shift_operator, build_step_circuit, WalkStep};

use crate::core::{SimulationError, WalkError, WalkResult};
use crate::simulation::{Backend, Job, SimulationResult};
use tracing::{debug, info};

/// Exactly one measurement sample per step.
const SHOTS_PER_STEP: u32 = 1;

/// Drives a [`Backend`] through the walk.
pub struct WalkSimulator<B: Backend> {
    backend: B,
}

impl<B: Backend> WalkSimulator<B> {
    /// Creates a walk simulator over `backend`.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// The underlying backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Computes an `n_steps`-long path.
    ///
    /// All step circuits are submitted before any result is collected; the
    /// results are then read back in step order so every outcome keeps its
    /// step index. A failure at any step aborts the whole walk.
    ///
    /// # Returns
    /// * `Ok(WalkPath)` with exactly `n_steps` states.
    /// * `Err(WalkError::InvalidStepCount)` if `n_steps == 0`.
    /// * `Err(WalkError::Simulation { step, .. })` if the backend fails.
    /// * `Err(WalkError::Decode { step, .. })` for a malformed outcome.
    pub fn compute_path(&self, n_steps: usize) -> WalkResult<WalkPath> {
        let outcomes = self.sample_outcomes(n_steps)?;
        let path = decode(&outcomes)?;
        info!(steps = path.len(), backend = self.backend.name(), "quantum walk path computed");
        Ok(path)
    }

    /// Runs the step circuits and returns the raw outcome of each step.
    pub fn sample_outcomes(&self, n_steps: usize) -> WalkResult<Vec<String>> {
        if n_steps == 0 {
            return Err(WalkError::InvalidStepCount(n_steps));
        }

        let coin = build_coin_operator();
        let shift = build_shift_operator();

        let mut jobs = Vec::with_capacity(n_steps);
        for index in 0..n_steps {
            let step = WalkStep::new(index);
            let circuit = build_step_circuit(step, &coin, &shift);
            let job = self
                .backend
                .submit(&circuit, SHOTS_PER_STEP)
                .map_err(|source| WalkError::Simulation { step: index, source })?;
            debug!(step = index, shifts = step.cumulative_shift_count(), job = job.id(), "step submitted");
            jobs.push(job);
        }

        jobs.into_iter()
            .enumerate()
            .map(|(step, job)| {
                let result = job.result().map_err(|source| WalkError::Simulation { step, source })?;
                let outcome = outcome_of(&result).map_err(|source| WalkError::Simulation { step, source })?;
                debug!(step, outcome = %outcome, "step measured");
                Ok(outcome)
            })
            .collect()
    }
}

/// Extracts the single sampled bitstring of a one-shot result.
pub fn outcome_of(result: &SimulationResult) -> Result<String, SimulationError> {
    result.single_outcome().map(str::to_string).ok_or_else(|| {
        SimulationError::Backend(format!(
            "expected exactly one outcome for a single-shot job, got {}",
            result.counts().len()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::Simulator;

    #[test]
    fn test_zero_steps_rejected() {
        let walk = WalkSimulator::new(Simulator::with_seed(1));
        assert_eq!(walk.compute_path(0).unwrap_err(), WalkError::InvalidStepCount(0));
    }

    #[test]
    fn test_path_length_matches_steps() -> Result<(), WalkError> {
        let walk = WalkSimulator::new(Simulator::with_seed(11));
        for n in [1, 2, 17] {
            assert_eq!(walk.compute_path(n)?.len(), n);
        }
        Ok(())
    }

    #[test]
    fn test_outcome_of_requires_single_key() {
        let mut counts = std::collections::HashMap::new();
        counts.insert("00".to_string(), 1);
        counts.insert("11".to_string(), 1);
        assert!(outcome_of(&SimulationResult::from_counts(counts)).is_err());
        assert!(outcome_of(&SimulationResult::from_counts(Default::default())).is_err());
    }
}
