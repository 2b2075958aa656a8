//! Clifford gate types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unitary gates available to stabilizer programs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StandardGate {
    /// Hadamard gate.
    H,
    /// Controlled-X (CNOT) gate. Targets are consumed as (control, target) pairs.
    CX,
}

impl StandardGate {
    /// Canonical instruction name.
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::H => "H",
            StandardGate::CX => "CX",
        }
    }

    /// Number of qubits consumed by one application of the gate.
    pub fn num_qubits(&self) -> u32 {
        match self {
            StandardGate::H => 1,
            StandardGate::CX => 2,
        }
    }
}

impl fmt::Display for StandardGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
