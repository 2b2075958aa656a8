//! Generation parameters.

use serde::{Deserialize, Serialize};

use crate::error::{GenError, GenResult};

/// Knobs for one memory experiment.
///
/// Every noise probability defaults to 0, and a channel whose probability is
/// 0 is left out of the program entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircuitGenParameters {
    /// How many times the measurement qubits are measured.
    pub rounds: u32,

    /// Code distance. On a rectangular rotated patch this is the number of
    /// data columns, which bounds the X-memory distance.
    pub distance: u32,

    /// Number of data rows of a rectangular rotated patch, which bounds the
    /// Z-memory distance. Defaults to `distance`; ignored by unrotated codes.
    #[serde(default)]
    pub x_distance: Option<u32>,

    /// `DEPOLARIZE1(p)` after every H and `DEPOLARIZE2(p)` after every CX.
    #[serde(default)]
    pub after_clifford_depolarization: f64,

    /// `DEPOLARIZE1(p)` on every data qubit at the start of each round.
    #[serde(default)]
    pub before_round_data_depolarization: f64,

    /// Flip channel (anti-basis) right before every measurement.
    #[serde(default)]
    pub before_measure_flip_probability: f64,

    /// Flip channel (anti-basis) right after every reset.
    #[serde(default)]
    pub after_reset_flip_probability: f64,

    /// Only declare steady-state detectors for measurement qubits of the
    /// memory basis.
    #[serde(default)]
    pub exclude_other_basis_detectors: bool,
}

impl CircuitGenParameters {
    /// Noiseless parameters for the given distance and number of rounds.
    pub fn new(distance: u32, rounds: u32) -> Self {
        Self {
            rounds,
            distance,
            x_distance: None,
            after_clifford_depolarization: 0.0,
            before_round_data_depolarization: 0.0,
            before_measure_flip_probability: 0.0,
            after_reset_flip_probability: 0.0,
            exclude_other_basis_detectors: false,
        }
    }

    /// Set all four noise probabilities at once, in the order
    /// (after Clifford, before round, before measure, after reset).
    pub fn with_noise(
        mut self,
        after_clifford: f64,
        before_round_data: f64,
        before_measure: f64,
        after_reset: f64,
    ) -> Self {
        self.after_clifford_depolarization = after_clifford;
        self.before_round_data_depolarization = before_round_data;
        self.before_measure_flip_probability = before_measure;
        self.after_reset_flip_probability = after_reset;
        self
    }

    /// Set the X distance of a rectangular rotated patch.
    pub fn with_x_distance(mut self, x_distance: u32) -> Self {
        self.x_distance = Some(x_distance);
        self
    }

    /// Enable or disable opposite-basis detector exclusion.
    pub fn with_exclude_other_basis_detectors(mut self, exclude: bool) -> Self {
        self.exclude_other_basis_detectors = exclude;
        self
    }

    /// X distance actually used by a rotated patch.
    pub fn effective_x_distance(&self) -> u32 {
        self.x_distance.unwrap_or(self.distance)
    }

    /// Reject parameters that cannot describe an experiment.
    pub fn validate(&self) -> GenResult<()> {
        if self.rounds < 1 {
            return Err(GenError::InvalidRounds(self.rounds));
        }
        if self.distance < 2 {
            return Err(GenError::InvalidDistance(self.distance));
        }
        if let Some(x_distance) = self.x_distance {
            if x_distance < 2 {
                return Err(GenError::InvalidDistance(x_distance));
            }
        }
        for (name, value) in [
            (
                "after_clifford_depolarization",
                self.after_clifford_depolarization,
            ),
            (
                "before_round_data_depolarization",
                self.before_round_data_depolarization,
            ),
            (
                "before_measure_flip_probability",
                self.before_measure_flip_probability,
            ),
            (
                "after_reset_flip_probability",
                self.after_reset_flip_probability,
            ),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(GenError::InvalidProbability { name, value });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_noiseless() {
        let params = CircuitGenParameters::new(3, 5);
        assert_eq!(params.distance, 3);
        assert_eq!(params.rounds, 5);
        assert_eq!(params.after_clifford_depolarization, 0.0);
        assert_eq!(params.effective_x_distance(), 3);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_validate_rounds_and_distance() {
        assert!(matches!(
            CircuitGenParameters::new(3, 0).validate(),
            Err(GenError::InvalidRounds(0))
        ));
        assert!(matches!(
            CircuitGenParameters::new(1, 3).validate(),
            Err(GenError::InvalidDistance(1))
        ));
        assert!(matches!(
            CircuitGenParameters::new(3, 3).with_x_distance(1).validate(),
            Err(GenError::InvalidDistance(1))
        ));
    }

    #[test]
    fn test_validate_probabilities() {
        let params = CircuitGenParameters::new(3, 3).with_noise(0.1, 0.0, 1.5, 0.0);
        assert!(matches!(
            params.validate(),
            Err(GenError::InvalidProbability {
                name: "before_measure_flip_probability",
                ..
            })
        ));
        let params = CircuitGenParameters::new(3, 3).with_noise(f64::NAN, 0.0, 0.0, 0.0);
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let params: CircuitGenParameters =
            serde_json::from_str(r#"{"rounds": 4, "distance": 5, "after_reset_flip_probability": 0.01}"#)
                .unwrap();
        assert_eq!(params.rounds, 4);
        assert_eq!(params.x_distance, None);
        assert_eq!(params.after_reset_flip_probability, 0.01);
        assert_eq!(params.before_measure_flip_probability, 0.0);
        assert!(!params.exclude_other_basis_detectors);
    }
}
