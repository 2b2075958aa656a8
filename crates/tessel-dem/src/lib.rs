//! `tessel-dem`: detector error models for noisy stabilizer programs.
//!
//! Turns a program annotated with `DETECTOR` and `OBSERVABLE_INCLUDE` into
//! the list of independent error mechanisms and the detectors and
//! observables each one flips, then measures the code's graph-like
//! distance from it.
//!
//! ```rust
//! use tessel_dem::{from_circuit, graphlike_distance};
//!
//! let circuit = tessel_stim::parse(
//!     "R 0\nX_ERROR(0.1) 0\nM 0\nDETECTOR rec[-1]\nOBSERVABLE_INCLUDE(0) rec[-1]\n",
//! )
//! .unwrap();
//! let dem = from_circuit(&circuit).unwrap();
//! assert_eq!(dem.num_mechanisms(), 1);
//! // The detector catches the only error, so no logical flip goes unseen.
//! assert_eq!(graphlike_distance(&dem), None);
//! ```

pub mod error;
pub mod extract;
pub mod graph;
pub mod model;

pub use error::{DemError, DemResult};
pub use extract::from_circuit;
pub use graph::{graphlike_distance, shortest_graphlike_error};
pub use model::{DetectorErrorModel, ErrorMechanism};
