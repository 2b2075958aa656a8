//! Error types for error-model extraction.

use thiserror::Error;

/// Errors that can occur while analysing a program.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DemError {
    /// A detector or observable refers to a result that was never recorded.
    #[error("Record offset rec[{offset}] reaches before the start of the record ({available} results available)")]
    RecordOutOfRange {
        /// Offending offset.
        offset: i32,
        /// Number of measurement results recorded at that point.
        available: u64,
    },

    /// More detectors than can be numbered.
    #[error("Program declares {0} detectors, which exceeds the supported maximum")]
    TooManyDetectors(usize),
}

/// Result type for error-model operations.
pub type DemResult<T> = Result<T, DemError>;
