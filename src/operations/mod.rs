// src/operations/mod.rs

//! Defines the gate set used to compose walk circuits, and `Instruction`,
//! a named reusable block of gates.
//!
//! Only the gates the coin and shift operators need are provided: Hadamard,
//! Y rotation, the S phase gate, controlled-NOT, and computational-basis
//! measurement.

use crate::core::{ClbitId, QubitId};

/// A single step of a circuit.
#[derive(Debug, Clone, PartialEq)] // f64 comparison is exact; fine for structural checks
pub enum Operation {
    /// Hadamard gate.
    Hadamard {
        /// Qubit the gate acts on.
        target: QubitId,
    },

    /// Rotation about the Y axis by `theta` radians.
    Ry {
        /// Qubit the gate acts on.
        target: QubitId,
        /// Rotation angle in radians.
        theta: f64,
    },

    /// Phase gate `S = diag(1, i)`.
    S {
        /// Qubit the gate acts on.
        target: QubitId,
    },

    /// Controlled-NOT: flips `target` when `control` is `|1>`.
    Cx {
        /// Control qubit.
        control: QubitId,
        /// Target qubit.
        target: QubitId,
    },

    /// Applies a reusable instruction block. `qubits[i]` is bound to the
    /// block's local qubit `i`.
    Append {
        /// The block, carried by value.
        instruction: Instruction,
        /// Circuit qubits the block is applied to.
        qubits: Vec<QubitId>,
    },

    /// Measures `qubit` in the computational basis into `clbit`.
    Measure {
        /// Measured qubit.
        qubit: QubitId,
        /// Classical bit receiving the result.
        clbit: ClbitId,
    },
}

impl Operation {
    /// Returns every circuit qubit the operation touches.
    pub fn involved_qubits(&self) -> Vec<QubitId> {
        match self {
            Operation::Hadamard { target }
            | Operation::Ry { target, .. }
            | Operation::S { target } => vec![*target],
            Operation::Cx { control, target } => vec![*control, *target],
            Operation::Append { qubits, .. } => qubits.clone(),
            Operation::Measure { qubit, .. } => vec![*qubit],
        }
    }

    /// Short symbol used by the circuit diagram.
    pub fn symbol(&self) -> &str {
        match self {
            Operation::Hadamard { .. } => "H",
            Operation::Ry { .. } => "RY",
            Operation::S { .. } => "S",
            Operation::Cx { .. } => "X",
            Operation::Append { instruction, .. } => instruction.name(),
            Operation::Measure { .. } => "M",
        }
    }

    /// `true` for `Measure`.
    pub fn is_measurement(&self) -> bool {
        matches!(self, Operation::Measure { .. })
    }
}

/// A named, immutable block of gates over a local register of
/// `num_qubits` qubits, indexed from zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
    name: String,
    num_qubits: usize,
    operations: Vec<Operation>,
}

impl Instruction {
    /// Creates a block. Measurements are not allowed inside a block, and
    /// every gate must stay inside the local register.
    pub fn new(name: impl Into<String>, num_qubits: usize, operations: Vec<Operation>) -> Option<Self> {
        let fits = operations.iter().all(|op| {
            !op.is_measurement() && op.involved_qubits().iter().all(|q| q.0 < num_qubits)
        });
        if !fits {
            return None;
        }
        Some(Self::from_parts(name, num_qubits, operations))
    }

    /// Creates a block whose gates are known to fit, without checking.
    pub(crate) fn from_parts(name: impl Into<String>, num_qubits: usize, operations: Vec<Operation>) -> Self {
        Self { name: name.into(), num_qubits, operations }
    }

    /// Block name, used as its diagram symbol.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Size of the local register.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// The gates of the block, in application order.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instruction_rejects_measurement() {
        let ops = vec![Operation::Measure { qubit: QubitId(0), clbit: ClbitId(0) }];
        assert!(Instruction::new("bad", 1, ops).is_none());
    }

    #[test]
    fn test_instruction_rejects_out_of_range_qubit() {
        let ops = vec![Operation::Cx { control: QubitId(0), target: QubitId(2) }];
        assert!(Instruction::new("bad", 2, ops).is_none());
    }

    #[test]
    fn test_involved_qubits() {
        let cx = Operation::Cx { control: QubitId(1), target: QubitId(0) };
        assert_eq!(cx.involved_qubits(), vec![QubitId(1), QubitId(0)]);
        assert_eq!(cx.symbol(), "X");
    }
}
