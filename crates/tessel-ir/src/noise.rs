//! Pauli noise channels.
//!
//! Every channel here is a stochastic Pauli channel, so it can be tracked
//! exactly by stabilizer-frame propagation. The probability is always the
//! total probability that *some* error happens.

use serde::{Deserialize, Serialize};

use crate::basis::Basis;
use crate::error::{IrError, IrResult};

/// A noise channel model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum NoiseModel {
    /// Single-qubit depolarizing channel: X, Y or Z each with probability `p/3`.
    Depolarize1 {
        /// Error probability (0.0 to 1.0).
        p: f64,
    },

    /// Two-qubit depolarizing channel: each of the 15 non-identity Pauli
    /// pairs with probability `p/15`. Targets are consumed in pairs.
    Depolarize2 {
        /// Error probability (0.0 to 1.0).
        p: f64,
    },

    /// Bit-flip channel: applies X with probability `p`.
    BitFlip {
        /// Flip probability (0.0 to 1.0).
        p: f64,
    },

    /// Phase-flip channel: applies Z with probability `p`.
    PhaseFlip {
        /// Flip probability (0.0 to 1.0).
        p: f64,
    },
}

impl NoiseModel {
    /// The channel that flips the outcome of a measurement in `basis`.
    ///
    /// Z errors flip X-basis results, X errors flip Z-basis results.
    pub fn flip(basis: Basis, p: f64) -> Self {
        match basis {
            Basis::X => NoiseModel::PhaseFlip { p },
            Basis::Z => NoiseModel::BitFlip { p },
        }
    }

    /// Canonical instruction name.
    pub fn name(&self) -> &'static str {
        match self {
            NoiseModel::Depolarize1 { .. } => "DEPOLARIZE1",
            NoiseModel::Depolarize2 { .. } => "DEPOLARIZE2",
            NoiseModel::BitFlip { .. } => "X_ERROR",
            NoiseModel::PhaseFlip { .. } => "Z_ERROR",
        }
    }

    /// Get the error probability of this channel.
    pub fn probability(&self) -> f64 {
        match self {
            NoiseModel::Depolarize1 { p }
            | NoiseModel::Depolarize2 { p }
            | NoiseModel::BitFlip { p }
            | NoiseModel::PhaseFlip { p } => *p,
        }
    }

    /// Number of qubits consumed by one application of the channel.
    pub fn num_qubits(&self) -> u32 {
        match self {
            NoiseModel::Depolarize2 { .. } => 2,
            _ => 1,
        }
    }

    /// Check that the probability lies in [0, 1].
    pub fn validate(&self) -> IrResult<()> {
        let p = self.probability();
        if !(0.0..=1.0).contains(&p) {
            return Err(IrError::InvalidProbability {
                channel: self.name().to_string(),
                p,
            });
        }
        Ok(())
    }
}

impl std::fmt::Display for NoiseModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.name(), self.probability())
    }
}
