// src/core/state.rs

use num_complex::Complex;
use num_traits::Zero;
use std::fmt;

/// Amplitudes of an n-qubit register over the computational basis.
///
/// Basis index `k` encodes qubit `i` in bit `i` of `k`, so `|q1 q0>` maps to
/// `k = 2*q1 + q0`. The dimension is always `2^n`.
#[derive(Debug, Clone, PartialEq)] // Avoid Eq for floating-point complex numbers
pub struct StateVector {
    amplitudes: Vec<Complex<f64>>,
    num_qubits: usize,
}

impl StateVector {
    /// Creates the ground state `|0...0>` for `num_qubits` qubits.
    /// Returns `None` if `2^num_qubits` overflows `usize`.
    pub fn zero_state(num_qubits: usize) -> Option<Self> {
        let dim = 1usize.checked_shl(num_qubits as u32)?;
        let mut amplitudes = vec![Complex::zero(); dim];
        amplitudes[0] = Complex::new(1.0, 0.0);
        Some(Self { amplitudes, num_qubits })
    }

    /// Builds a state from explicit amplitudes. Length must be a power of two.
    pub fn from_amplitudes(amplitudes: Vec<Complex<f64>>) -> Option<Self> {
        let dim = amplitudes.len();
        if dim == 0 || !dim.is_power_of_two() {
            return None;
        }
        let num_qubits = dim.trailing_zeros() as usize;
        Some(Self { amplitudes, num_qubits })
    }

    /// Provides read-only access to the amplitudes.
    pub fn amplitudes(&self) -> &[Complex<f64>] {
        &self.amplitudes
    }

    pub(crate) fn amplitudes_mut(&mut self) -> &mut [Complex<f64>] {
        &mut self.amplitudes
    }

    /// Number of basis states (`2^n`).
    pub fn dim(&self) -> usize {
        self.amplitudes.len()
    }

    /// Number of qubits represented.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Born-rule probability of each basis state.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|c| c.norm_sqr()).collect()
    }

    /// Squared norm, `1.0` for a valid state.
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(|c| c.norm_sqr()).sum()
    }
}

impl fmt::Display for StateVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "State[")?;
        for (i, c) in self.amplitudes.iter().enumerate() {
            write!(f, "{}{:.4}", if i > 0 { ", " } else { "" }, c)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_state_dimension() {
        let state = StateVector::zero_state(2).unwrap();
        assert_eq!(state.dim(), 4);
        assert_eq!(state.num_qubits(), 2);
        assert_eq!(state.probabilities(), vec![1.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_from_amplitudes_rejects_non_power_of_two() {
        assert!(StateVector::from_amplitudes(vec![Complex::zero(); 3]).is_none());
        assert!(StateVector::from_amplitudes(Vec::new()).is_none());
        let s = StateVector::from_amplitudes(vec![Complex::zero(); 8]).unwrap();
        assert_eq!(s.num_qubits(), 3);
    }
}
