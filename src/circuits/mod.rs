// src/circuits/mod.rs

//! Defines structures for representing and building ordered sequences of
//! operations (`qwalk::operations::Operation`) over fixed quantum and
//! classical registers.

use crate::operations::{Instruction, Operation};
use std::fmt;

/// An ordered sequence of operations over `num_qubits` qubits and
/// `num_clbits` classical bits.
#[derive(Clone, PartialEq)]
pub struct Circuit {
    num_qubits: usize,
    num_clbits: usize,
    /// The order is the application order.
    operations: Vec<Operation>,
}

impl Circuit {
    /// Creates a new, empty circuit over the given registers.
    pub fn new(num_qubits: usize, num_clbits: usize) -> Self {
        Self {
            num_qubits,
            num_clbits,
            operations: Vec::new(),
        }
    }

    /// Adds a single operation to the end of the circuit.
    ///
    /// Register bounds are checked by the simulator when the circuit runs.
    pub fn add_operation(&mut self, op: Operation) {
        self.operations.push(op);
    }

    /// Adds multiple operations from an iterator to the end of the circuit.
    pub fn add_operations<I>(&mut self, ops: I)
    where
        I: IntoIterator<Item = Operation>,
    {
        self.operations.extend(ops);
    }

    /// Size of the quantum register.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Size of the classical register.
    pub fn num_clbits(&self) -> usize {
        self.num_clbits
    }

    /// Returns the ordered operations.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Returns the total number of top-level operations.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Returns `true` if the circuit contains no operations.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Counts top-level applications of the instruction named `name`.
    pub fn count_instruction(&self, name: &str) -> usize {
        self.operations
            .iter()
            .filter(|op| matches!(op, Operation::Append { instruction, .. } if instruction.name() == name))
            .count()
    }

    /// Counts measurement operations.
    pub fn count_measurements(&self) -> usize {
        self.operations.iter().filter(|op| op.is_measurement()).count()
    }

    /// Wraps the circuit's gates into a reusable block.
    /// Returns `None` if the circuit contains a measurement.
    pub fn to_instruction(&self, name: impl Into<String>) -> Option<Instruction> {
        Instruction::new(name, self.num_qubits, self.operations.clone())
    }
}

//-------------------------------------------------------------------------
// Circuit Builder
//-------------------------------------------------------------------------

/// A helper struct for programmatically constructing `Circuit` instances using method chaining.
pub struct CircuitBuilder {
    circuit: Circuit,
}

impl CircuitBuilder {
    /// Creates a builder over the given registers.
    pub fn new(num_qubits: usize, num_clbits: usize) -> Self {
        Self {
            circuit: Circuit::new(num_qubits, num_clbits),
        }
    }

    /// Adds a single operation to the circuit being built.
    pub fn add_op(mut self, op: Operation) -> Self {
        self.circuit.add_operation(op);
        self
    }

    /// Adds multiple operations from an iterator to the circuit being built.
    pub fn add_ops<I>(mut self, ops: I) -> Self
    where
        I: IntoIterator<Item = Operation>,
    {
        self.circuit.add_operations(ops);
        self
    }

    /// Finalizes the construction process and returns the built `Circuit`.
    pub fn build(self) -> Circuit {
        self.circuit
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.operations.is_empty() || self.num_qubits == 0 {
            return writeln!(f, "qwalk::Circuit[0 operations on {} qubits]", self.num_qubits);
        }

        let ops = &self.operations;
        let num_ops = ops.len();
        let num_qubits = self.num_qubits;
        let label_width = format!("q{}", num_qubits - 1).len();
        let label_padding = " ".repeat(label_width + 2); // Label + ": "

        const GATE_WIDTH: usize = 9; // e.g., "──shift──"
        const V_WIRE: char = '│';
        const H_WIRE: char = '─';
        let wire: String = H_WIRE.to_string().repeat(GATE_WIDTH);

        // op_grid[row][time] holds the gate or wire segment
        let mut op_grid: Vec<Vec<String>> = vec![vec![wire.clone(); num_ops]; num_qubits];
        // v_connect[row][time] holds the connector drawn below `row`
        let mut v_connect: Vec<Vec<char>> = vec![vec![' '; num_ops]; num_qubits];

        fn format_gate(symbol: &str) -> String {
            let slen = symbol.chars().count();
            if slen >= GATE_WIDTH {
                symbol.chars().take(GATE_WIDTH).collect()
            } else {
                let total_dashes = GATE_WIDTH - slen;
                let pre_dashes = total_dashes / 2;
                let post_dashes = total_dashes - pre_dashes;
                format!("{}{}{}", H_WIRE.to_string().repeat(pre_dashes), symbol, H_WIRE.to_string().repeat(post_dashes))
            }
        }

        for (t, op) in ops.iter().enumerate() {
            let rows: Vec<usize> = op
                .involved_qubits()
                .iter()
                .map(|q| q.0)
                .filter(|r| *r < num_qubits)
                .collect();
            match op {
                Operation::Cx { control, target } => {
                    if control.0 < num_qubits && target.0 < num_qubits {
                        op_grid[control.0][t] = format_gate("@");
                        op_grid[target.0][t] = format_gate("X");
                    }
                }
                Operation::Measure { clbit, .. } => {
                    for r in &rows {
                        op_grid[*r][t] = format_gate(&format!("M{}", clbit.0));
                    }
                }
                _ => {
                    for r in &rows {
                        op_grid[*r][t] = format_gate(op.symbol());
                    }
                }
            }
            if rows.len() > 1 {
                let r_min = *rows.iter().min().unwrap_or(&0);
                let r_max = *rows.iter().max().unwrap_or(&0);
                for row_vec in v_connect.iter_mut().take(r_max).skip(r_min) {
                    row_vec[t] = V_WIRE;
                }
            }
        }

        writeln!(f, "qwalk::Circuit[{} operations on {} qubits, {} clbits]", num_ops, num_qubits, self.num_clbits)?;
        for r in 0..num_qubits {
            let label = format!("q{}: ", r);
            write!(f, "{:<width$}", label, width = label_width + 2)?;
            writeln!(f, "{}", op_grid[r].join(""))?;

            if r < num_qubits - 1 {
                write!(f, "{}", label_padding)?;
                for t in 0..num_ops {
                    let connector = v_connect[r][t];
                    let padding_needed = GATE_WIDTH.saturating_sub(1);
                    let pre_pad = padding_needed / 2;
                    let post_pad = padding_needed - pre_pad;
                    write!(f, "{}{}{}", " ".repeat(pre_pad), connector, " ".repeat(post_pad))?;
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

// Keep the Debug impl delegating to Display
impl fmt::Debug for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
