// src/walk/factory.rs

//! Builds the fixed coin and shift operators and composes the per-step circuit.

use crate::circuits::{Circuit, CircuitBuilder};
use crate::core::{ClbitId, QubitId, SHIFT_RY_ANGLE, WALK_QUBITS};
use crate::operations::{Instruction, Operation};

/// Name of the shift block inside step circuits.
pub const SHIFT_NAME: &str = "shift";
/// Name of the coin block inside step circuits.
pub const COIN_NAME: &str = "coin";

fn walk_register() -> Vec<QubitId> {
    (0..WALK_QUBITS).map(QubitId).collect()
}

/// The shift operator: H(q0), RY(π/4)(q1), CX(q0→q1), S(q0).
pub fn build_shift_operator() -> Instruction {
    let ops = vec![
        Operation::Hadamard { target: QubitId(0) },
        Operation::Ry { target: QubitId(1), theta: SHIFT_RY_ANGLE },
        Operation::Cx { control: QubitId(0), target: QubitId(1) },
        Operation::S { target: QubitId(0) },
    ];
    Instruction::from_parts(SHIFT_NAME, WALK_QUBITS, ops)
}

/// The coin: a Hadamard on every walk qubit, giving a uniform superposition.
pub fn build_coin_operator() -> Instruction {
    let ops = walk_register().into_iter().map(|target| Operation::Hadamard { target }).collect();
    Instruction::from_parts(COIN_NAME, WALK_QUBITS, ops)
}

/// One step of the walk. Everything is derived from the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkStep {
    index: usize,
}

impl WalkStep {
    /// Step number `index` (zero based).
    pub fn new(index: usize) -> Self {
        Self { index }
    }

    /// Position of the step in the path.
    pub fn index(&self) -> usize {
        self.index
    }

    /// How many times the shift operator is applied: `index + 1`.
    pub fn cumulative_shift_count(&self) -> usize {
        self.index + 1
    }

    /// Only the first step starts from the coin.
    pub fn includes_coin(&self) -> bool {
        self.index == 0
    }
}

/// Composes the circuit for `step` from scratch: coin (step 0 only), the
/// shift block `step + 1` times, then q0→c0 and q1→c1 measurements.
pub fn build_step_circuit(step: WalkStep, coin: &Instruction, shift: &Instruction) -> Circuit {
    let register = walk_register();
    let mut builder = CircuitBuilder::new(WALK_QUBITS, WALK_QUBITS);

    if step.includes_coin() {
        builder = builder.add_op(Operation::Append { instruction: coin.clone(), qubits: register.clone() });
    }

    builder = builder.add_ops((0..step.cumulative_shift_count()).map(|_| Operation::Append {
        instruction: shift.clone(),
        qubits: register.clone(),
    }));

    builder
        .add_ops(register.iter().map(|q| Operation::Measure { qubit: *q, clbit: ClbitId(q.0) }))
        .build()
}
