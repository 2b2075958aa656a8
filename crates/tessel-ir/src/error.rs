//! Error types for the IR crate.

use crate::qubit::QubitId;
use thiserror::Error;

/// Errors that can occur while building a program.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Gate received a target list that is not a multiple of its arity.
    #[error("Gate '{gate_name}' acts on {arity} qubits at a time, got {got} targets")]
    QubitCountMismatch {
        /// Name of the gate.
        gate_name: String,
        /// Qubits consumed per application.
        arity: u32,
        /// Number of targets provided.
        got: u32,
    },

    /// A two-qubit operation was given the same qubit twice.
    #[error("Duplicate qubit {qubit} in operation{}", format_gate_context(.gate_name))]
    DuplicateQubit {
        /// The duplicate qubit.
        qubit: QubitId,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// Noise channel probability outside [0, 1].
    #[error("Probability {p} for '{channel}' is outside [0, 1]")]
    InvalidProbability {
        /// Channel name.
        channel: String,
        /// Offending probability.
        p: f64,
    },

    /// Measurement record offsets must be strictly negative.
    #[error("Measurement record offset must be negative, got {0}")]
    InvalidRecordOffset(i64),

    /// A detector or observable looks further back than the record extends.
    #[error("Record offset rec[{offset}] reaches before the start of the record ({available} results available)")]
    RecordOutOfRange {
        /// Offending offset.
        offset: i32,
        /// Number of measurement results recorded so far.
        available: u64,
    },
}

/// Helper function to format optional gate context.
#[allow(clippy::ref_option)]
fn format_gate_context(gate_name: &Option<String>) -> String {
    match gate_name {
        Some(name) => format!(" (gate: {name})"),
        None => String::new(),
    }
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
