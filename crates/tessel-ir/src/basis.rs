//! Pauli bases for resets and measurements.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The basis a qubit is prepared or measured in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Basis {
    /// Eigenbasis of Pauli X (|+⟩, |−⟩).
    X,
    /// Eigenbasis of Pauli Z (|0⟩, |1⟩).
    Z,
}

impl Basis {
    /// The other basis.
    pub fn opposite(self) -> Self {
        match self {
            Basis::X => Basis::Z,
            Basis::Z => Basis::X,
        }
    }
}

impl fmt::Display for Basis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Basis::X => write!(f, "X"),
            Basis::Z => write!(f, "Z"),
        }
    }
}
