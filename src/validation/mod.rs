// src/validation/mod.rs

//! Provides functions to validate a `StateVector` between gate applications.

use crate::core::{SimResult, SimulationError, StateVector};

/// Default allowed deviation of the squared norm from 1.0.
pub const DEFAULT_NORM_TOLERANCE: f64 = 1e-9;

/// Checks if the state vector is normalized (sum of squared amplitudes ≈ 1.0).
///
/// # Arguments
/// * `state` - The `StateVector` to check.
/// * `tolerance` - Allowed deviation from 1.0. Defaults to [`DEFAULT_NORM_TOLERANCE`].
///
/// # Returns
/// * `Ok(())` if normalized within tolerance.
/// * `Err(SimulationError::Unnormalized)` otherwise.
pub fn check_normalization(state: &StateVector, tolerance: Option<f64>) -> SimResult<()> {
    let effective_tolerance = tolerance.unwrap_or(DEFAULT_NORM_TOLERANCE);
    let norm_sq = state.norm_sqr();
    if (norm_sq - 1.0).abs() > effective_tolerance || !norm_sq.is_finite() {
        Err(SimulationError::Unnormalized { norm_sq })
    } else {
        Ok(())
    }
}

/// Validates a state before it is sampled: the dimension must match the
/// register width and the amplitudes must be normalized.
pub fn validate_state(state: &StateVector, num_qubits: usize, norm_tolerance: Option<f64>) -> SimResult<()> {
    if state.num_qubits() != num_qubits {
        return Err(SimulationError::Backend(format!(
            "state covers {} qubits, register has {}",
            state.num_qubits(),
            num_qubits
        )));
    }
    check_normalization(state, norm_tolerance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex;
    use std::f64::consts::FRAC_1_SQRT_2;

    #[test]
    fn test_normalized_superposition_passes() {
        let state = StateVector::from_amplitudes(vec![
            Complex::new(FRAC_1_SQRT_2, 0.0),
            Complex::new(0.0, FRAC_1_SQRT_2),
        ])
        .unwrap();
        assert!(check_normalization(&state, None).is_ok());
        assert!(validate_state(&state, 1, None).is_ok());
    }

    #[test]
    fn test_unnormalized_state_fails() {
        let state = StateVector::from_amplitudes(vec![Complex::new(1.0, 0.0), Complex::new(1.0, 0.0)]).unwrap();
        match check_normalization(&state, None) {
            Err(SimulationError::Unnormalized { norm_sq }) => assert!((norm_sq - 2.0).abs() < 1e-12),
            other => panic!("expected Unnormalized, got {:?}", other),
        }
    }

    #[test]
    fn test_register_width_mismatch() {
        let state = StateVector::zero_state(2).unwrap();
        assert!(validate_state(&state, 3, None).is_err());
    }
}
