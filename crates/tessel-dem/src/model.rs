//! Detector error model types.

use serde::{Deserialize, Serialize};
use std::fmt;
use tessel_ir::Circuit;

use crate::error::DemResult;

/// One independent error mechanism: with `probability` it flips exactly the
/// listed detectors and observables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorMechanism {
    pub probability: f64,
    /// Sorted detector indices.
    pub detectors: Vec<u32>,
    /// Sorted observable indices.
    pub observables: Vec<u32>,
}

impl ErrorMechanism {
    /// Flips a single detector, i.e. an edge to the boundary.
    pub fn is_boundary(&self) -> bool {
        self.detectors.len() == 1
    }

    /// Flips exactly two detectors.
    pub fn is_edge(&self) -> bool {
        self.detectors.len() == 2
    }

    /// Flips more than two detectors and has no graph-like form.
    pub fn is_hyperedge(&self) -> bool {
        self.detectors.len() > 2
    }

    /// Flips an observable without tripping any detector.
    pub fn is_undetectable_logical(&self) -> bool {
        self.detectors.is_empty() && !self.observables.is_empty()
    }
}

/// The error mechanisms of a noisy program, with detector metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectorErrorModel {
    pub num_detectors: u32,
    pub num_observables: u32,
    /// Coordinates of each detector, with `SHIFT_COORDS` offsets applied.
    pub detector_coordinates: Vec<Vec<f64>>,
    /// Mechanisms with distinct symptoms, sorted by symptom.
    pub mechanisms: Vec<ErrorMechanism>,
}

impl DetectorErrorModel {
    /// Extract the model of a noisy program. See [`crate::extract`].
    pub fn from_circuit(circuit: &Circuit) -> DemResult<Self> {
        crate::extract::from_circuit(circuit)
    }

    pub fn num_mechanisms(&self) -> usize {
        self.mechanisms.len()
    }

    /// Largest number of detectors flipped by a single mechanism.
    pub fn max_detectors_per_mechanism(&self) -> usize {
        self.mechanisms
            .iter()
            .map(|m| m.detectors.len())
            .max()
            .unwrap_or(0)
    }

    /// Whether every mechanism flips at most two detectors.
    pub fn is_graphlike(&self) -> bool {
        !self.mechanisms.iter().any(ErrorMechanism::is_hyperedge)
    }

    /// Coordinates of one detector.
    pub fn detector_coordinates(&self, detector: u32) -> Option<&[f64]> {
        self.detector_coordinates
            .get(detector as usize)
            .map(Vec::as_slice)
    }
}

fn write_args(f: &mut fmt::Formatter<'_>, args: &[f64]) -> fmt::Result {
    write!(f, "(")?;
    for (i, a) in args.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{a}")?;
    }
    write!(f, ")")
}

/// Writes the model in stim's `.dem` text layout.
impl fmt::Display for DetectorErrorModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for m in &self.mechanisms {
            write!(f, "error({})", m.probability)?;
            for d in &m.detectors {
                write!(f, " D{d}")?;
            }
            for l in &m.observables {
                write!(f, " L{l}")?;
            }
            writeln!(f)?;
        }
        for (d, coords) in self.detector_coordinates.iter().enumerate() {
            write!(f, "detector")?;
            if !coords.is_empty() {
                write_args(f, coords)?;
            }
            writeln!(f, " D{d}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mechanism(detectors: &[u32], observables: &[u32]) -> ErrorMechanism {
        ErrorMechanism {
            probability: 0.125,
            detectors: detectors.to_vec(),
            observables: observables.to_vec(),
        }
    }

    #[test]
    fn test_classification() {
        assert!(mechanism(&[3], &[]).is_boundary());
        assert!(mechanism(&[1, 2], &[0]).is_edge());
        assert!(mechanism(&[1, 2, 5], &[]).is_hyperedge());
        assert!(mechanism(&[], &[0]).is_undetectable_logical());
    }

    #[test]
    fn test_display() {
        let dem = DetectorErrorModel {
            num_detectors: 2,
            num_observables: 1,
            detector_coordinates: vec![vec![1.0, 2.0, 0.0], vec![]],
            mechanisms: vec![mechanism(&[0], &[0]), mechanism(&[0, 1], &[])],
        };
        assert_eq!(
            dem.to_string(),
            "error(0.125) D0 L0\nerror(0.125) D0 D1\ndetector(1, 2, 0) D0\ndetector D1\n"
        );
        assert!(dem.is_graphlike());
        assert_eq!(dem.max_detectors_per_mechanism(), 2);
    }
}
