//! Error types for the generator crate.

use thiserror::Error;

use crate::coord::Coord;

/// Errors produced while generating a memory experiment.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GenError {
    /// rounds must be ≥ 1.
    #[error("Need rounds >= 1, got {0}")]
    InvalidRounds(u32),

    /// distance must be ≥ 2.
    #[error("Need a distance >= 2, got {0}")]
    InvalidDistance(u32),

    /// A noise probability lies outside [0, 1].
    #[error("Parameter '{name}' must be a probability in [0, 1], got {value}")]
    InvalidProbability {
        /// Parameter name.
        name: &'static str,
        /// Offending value.
        value: f64,
    },

    /// Code family before the ':' is not known.
    #[error("Code name {0} not recognised")]
    UnknownCodeFamily(String),

    /// Task after the ':' is not known.
    #[error("Unrecognised task: {0}")]
    UnknownTask(String),

    /// The code family does not offer this task.
    #[error("Unrecognised task: {task} is not available for {family}")]
    UnsupportedTask {
        /// Code family name.
        family: String,
        /// Task name.
        task: String,
    },

    /// Code task string is not of the form `family:task`.
    #[error("Malformed code task '{0}', expected 'family:task'")]
    MalformedCodeTask(String),

    /// Two lattice sites map to the same qubit index.
    #[error("Coordinates {first} and {second} both map to qubit {index}")]
    IndexCollision {
        /// Shared qubit index.
        index: u32,
        /// Site indexed first.
        first: Coord,
        /// Site indexed second.
        second: Coord,
    },

    /// A lattice site has no valid qubit index.
    #[error("Coordinate {0} cannot be assigned a qubit index")]
    UnindexableCoordinate(Coord),

    /// A neighbour lookup landed outside the lattice.
    #[error("Coordinate {coord} is missing from the {table} table")]
    MissingCoordinate {
        /// Looked-up site.
        coord: Coord,
        /// Which table was consulted.
        table: &'static str,
    },

    /// A qubit index has no lattice site.
    #[error("Qubit {0} has no lattice coordinate")]
    MissingQubit(u32),

    /// A record count does not fit a record offset.
    #[error("Lattice of {0} qubits is too large to address by record offsets")]
    LatticeTooLarge(usize),

    /// Circuit builder returned an error.
    #[error("Circuit IR error: {0}")]
    Ir(#[from] tessel_ir::IrError),
}

/// Result type for generation operations.
pub type GenResult<T> = Result<T, GenError>;
