// src/simulation/engine.rs
use crate::core::{ClbitId, QubitId, SimResult, SimulationError, StateVector};
use crate::operations::Operation;
use crate::validation::check_normalization;
use num_complex::Complex;
use num_traits::Zero; // For Complex::zero()
use rand::Rng;

/// Probabilities below this are treated as zero when sampling.
const PROBABILITY_TOLERANCE: f64 = 1e-12;

/// State-vector engine for one shot of one circuit.
/// (Internal visibility)
pub(crate) struct SimulationEngine {
    state: StateVector,
    num_qubits: usize,
    /// Classical register, one entry per clbit, written by measurements.
    clbits: Vec<u8>,
}

impl SimulationEngine {
    /// Initializes the engine in `|0...0>` with a zeroed classical register.
    pub(crate) fn init(num_qubits: usize, num_clbits: usize) -> SimResult<Self> {
        if num_qubits == 0 {
            return Err(SimulationError::EmptyRegister);
        }
        let state = StateVector::zero_state(num_qubits).ok_or_else(|| {
            SimulationError::Backend(format!("{} qubits overflow the state vector dimension", num_qubits))
        })?;
        Ok(Self {
            state,
            num_qubits,
            clbits: vec![0; num_clbits],
        })
    }

    #[cfg(test)]
    pub(crate) fn set_state(&mut self, state: StateVector) -> SimResult<()> {
        if state.dim() != self.state.dim() {
            return Err(SimulationError::Backend(format!(
                "cannot set state: provided dimension {} does not match engine dimension {}",
                state.dim(),
                self.state.dim()
            )));
        }
        self.state = state;
        Ok(())
    }

    pub(crate) fn state(&self) -> &StateVector {
        &self.state
    }

    /// Applies one operation. `Append` blocks are expanded with their qubit
    /// binding; measurements draw from `rng`.
    pub(crate) fn apply_operation<R: Rng>(&mut self, op: &Operation, rng: &mut R) -> SimResult<()> {
        let identity = |q: QubitId| -> SimResult<QubitId> { Ok(q) };
        self.apply_mapped(op, &identity, rng)
    }

    fn apply_mapped<R: Rng>(
        &mut self,
        op: &Operation,
        map: &dyn Fn(QubitId) -> SimResult<QubitId>,
        rng: &mut R,
    ) -> SimResult<()> {
        match op {
            Operation::Hadamard { target } => {
                let t = self.index_of(map(*target)?)?;
                self.apply_single_qubit_gate(t, &hadamard_matrix());
            }
            Operation::Ry { target, theta } => {
                let t = self.index_of(map(*target)?)?;
                self.apply_single_qubit_gate(t, &ry_matrix(*theta));
            }
            Operation::S { target } => {
                let t = self.index_of(map(*target)?)?;
                self.apply_single_qubit_gate(t, &s_matrix());
            }
            Operation::Cx { control, target } => {
                let c = self.index_of(map(*control)?)?;
                let t = self.index_of(map(*target)?)?;
                if c == t {
                    return Err(SimulationError::DuplicateQubit(QubitId(c)));
                }
                self.apply_cx(c, t);
            }
            Operation::Append { instruction, qubits } => {
                if qubits.len() != instruction.num_qubits() {
                    return Err(SimulationError::InstructionArity {
                        name: instruction.name().to_string(),
                        expected: instruction.num_qubits(),
                        got: qubits.len(),
                    });
                }
                // Bind the block's local qubits to the outer (already mapped) qubits.
                let bound: Vec<QubitId> = qubits.iter().map(|q| map(*q)).collect::<SimResult<_>>()?;
                let inner = |local: QubitId| {
                    bound.get(local.0).copied().ok_or(SimulationError::QubitOutOfRange {
                        qubit: local,
                        num_qubits: bound.len(),
                    })
                };
                for inner_op in instruction.operations() {
                    self.apply_mapped(inner_op, &inner, rng)?;
                }
            }
            Operation::Measure { qubit, clbit } => {
                let q = self.index_of(map(*qubit)?)?;
                self.measure(q, *clbit, rng)?;
            }
        }
        Ok(())
    }

    /// Measures qubit `q` in the computational basis, collapses the state
    /// onto the observed branch and writes the bit into `clbit`.
    pub(crate) fn measure<R: Rng>(&mut self, q: usize, clbit: ClbitId, rng: &mut R) -> SimResult<u8> {
        if clbit.0 >= self.clbits.len() {
            return Err(SimulationError::ClbitOutOfRange { clbit, num_clbits: self.clbits.len() });
        }
        check_normalization(&self.state, None)?;

        let mask = 1usize << q;
        let p_one: f64 = self
            .state
            .amplitudes()
            .iter()
            .enumerate()
            .filter(|(k, _)| k & mask != 0)
            .map(|(_, c)| c.norm_sqr())
            .sum();

        let outcome: u8 = if p_one < PROBABILITY_TOLERANCE {
            0
        } else if 1.0 - p_one < PROBABILITY_TOLERANCE {
            1
        } else if rng.random::<f64>() < p_one {
            1
        } else {
            0
        };

        let p_kept = if outcome == 1 { p_one } else { 1.0 - p_one };
        let scale = 1.0 / p_kept.sqrt();
        for (k, amp) in self.state.amplitudes_mut().iter_mut().enumerate() {
            let bit = u8::from(k & mask != 0);
            if bit == outcome {
                *amp *= scale;
            } else {
                *amp = Complex::zero();
            }
        }

        self.clbits[clbit.0] = outcome;
        Ok(outcome)
    }

    /// Classical register as a bitstring, highest clbit first.
    pub(crate) fn bitstring(&self) -> String {
        self.clbits
            .iter()
            .rev()
            .map(|b| if *b == 1 { '1' } else { '0' })
            .collect()
    }

    fn index_of(&self, qubit: QubitId) -> SimResult<usize> {
        if qubit.0 < self.num_qubits {
            Ok(qubit.0)
        } else {
            Err(SimulationError::QubitOutOfRange { qubit, num_qubits: self.num_qubits })
        }
    }

    /// Applies a 2x2 matrix to qubit `t`. Qubit `t` is bit `t` of the basis index.
    fn apply_single_qubit_gate(&mut self, t: usize, matrix: &[[Complex<f64>; 2]; 2]) {
        let mask = 1usize << t;
        let amps = self.state.amplitudes_mut();
        for i0 in 0..amps.len() {
            if i0 & mask != 0 {
                continue;
            }
            let i1 = i0 | mask;
            let psi_0 = amps[i0];
            let psi_1 = amps[i1];
            amps[i0] = matrix[0][0] * psi_0 + matrix[0][1] * psi_1;
            amps[i1] = matrix[1][0] * psi_0 + matrix[1][1] * psi_1;
        }
    }

    /// Swaps the target amplitudes in the control=|1> subspace.
    fn apply_cx(&mut self, c: usize, t: usize) {
        let c_mask = 1usize << c;
        let t_mask = 1usize << t;
        let amps = self.state.amplitudes_mut();
        for k in 0..amps.len() {
            if k & c_mask != 0 && k & t_mask == 0 {
                amps.swap(k, k | t_mask);
            }
        }
    }
}

fn hadamard_matrix() -> [[Complex<f64>; 2]; 2] {
    let h = Complex::new(std::f64::consts::FRAC_1_SQRT_2, 0.0);
    [[h, h], [h, -h]]
}

/// `RY(theta) = [[cos(a), -sin(a)], [sin(a), cos(a)]]` where `a = theta / 2`.
fn ry_matrix(theta: f64) -> [[Complex<f64>; 2]; 2] {
    let a = theta / 2.0;
    [
        [Complex::new(a.cos(), 0.0), Complex::new(-a.sin(), 0.0)],
        [Complex::new(a.sin(), 0.0), Complex::new(a.cos(), 0.0)],
    ]
}

fn s_matrix() -> [[Complex<f64>; 2]; 2] {
    [
        [Complex::new(1.0, 0.0), Complex::zero()],
        [Complex::zero(), Complex::i()],
    ]
}
