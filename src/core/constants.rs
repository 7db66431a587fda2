//! Constants shared by the walk and the playback stage.

/// Fixed parameters of the 2-qubit walk and its default configuration.
pub mod qwalk_constants {
    /// Width of the walk register. The coin/shift topology is fixed at two qubits.
    pub const WALK_QUBITS: usize = 2;
    /// Number of walk steps computed when none is configured.
    pub const DEFAULT_N_STEPS: usize = 100;
    /// Window scale handed to the external player (clips are shown at half size).
    pub const DEFAULT_SCALE: f64 = 0.5;
    /// Rotation applied to qubit 1 by the shift operator.
    pub const SHIFT_RY_ANGLE: f64 = std::f64::consts::FRAC_PI_4;
}
