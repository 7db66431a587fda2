// src/simulation/results.rs
use std::collections::HashMap;
use std::fmt;

/// Holds the results of a circuit simulation: how many shots produced each
/// classical bitstring (highest clbit leftmost).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationResult {
    counts: HashMap<String, u64>,
    shots: u32,
}

impl SimulationResult {
    /// Creates a new, empty result set for `shots` executions.
    pub(crate) fn new(shots: u32) -> Self {
        Self {
            counts: HashMap::new(),
            shots,
        }
    }

    /// Builds a result from precomputed counts. Used by external backends.
    pub fn from_counts(counts: HashMap<String, u64>) -> Self {
        let shots = counts.values().sum::<u64>() as u32;
        Self { counts, shots }
    }

    /// Records one shot's classical register.
    pub(crate) fn record_shot(&mut self, bitstring: String) {
        *self.counts.entry(bitstring).or_insert(0) += 1;
    }

    /// Returns the bitstring → shot count map.
    pub fn counts(&self) -> &HashMap<String, u64> {
        &self.counts
    }

    /// Number of shots the result covers.
    pub fn shots(&self) -> u32 {
        self.shots
    }

    /// For a single-shot run, the one observed bitstring. `None` if the
    /// result does not hold exactly one distinct outcome.
    pub fn single_outcome(&self) -> Option<&str> {
        if self.counts.len() == 1 {
            self.counts.keys().next().map(String::as_str)
        } else {
            None
        }
    }
}

impl fmt::Display for SimulationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Simulation Results ({} shots):", self.shots)?;
        if self.counts.is_empty() {
            writeln!(f, "  No measurements recorded.")?;
        } else {
            let mut sorted: Vec<_> = self.counts.iter().collect();
            sorted.sort_by(|a, b| a.0.cmp(b.0));
            for (bits, count) in sorted {
                writeln!(f, "    {}: {}", bits, count)?;
            }
        }
        Ok(())
    }
}
