//! Tessel stabilizer program representation
//!
//! This crate provides the program container that the code generators build
//! into and the text emitter and analysis tools read from.
//!
//! # Core Components
//!
//! - **Targets**: [`QubitId`] for qubits, [`RecordOffset`] for `rec[-k]`
//!   references into the measurement record
//! - **Operations**: [`StandardGate`] (H, CX), [`Basis`] for resets and
//!   measurements, [`NoiseModel`] for Pauli noise channels
//! - **Instructions**: [`Instruction`] combining a kind with its targets
//! - **Circuit**: [`Circuit`] builder with instruction fusion, concatenation
//!   and repeat blocks
//!
//! # Example: One Round of a Parity Check
//!
//! ```rust
//! use tessel_ir::{Basis, Circuit, QubitId, RecordOffset};
//!
//! let mut round = Circuit::new();
//! round.tick().unwrap();
//! round.cx([QubitId(0), QubitId(2), QubitId(1), QubitId(2)]).unwrap();
//! round.measure_reset([QubitId(2)], Basis::Z).unwrap();
//!
//! let mut first = round.clone();
//! first.detector([RecordOffset::new(-1).unwrap()], &[1.0, 0.0, 0.0]).unwrap();
//!
//! let mut later = round.clone();
//! later
//!     .detector(
//!         [RecordOffset::new(-1).unwrap(), RecordOffset::new(-2).unwrap()],
//!         &[1.0, 0.0, 0.0],
//!     )
//!     .unwrap();
//!
//! let program = first + later * 9;
//! assert_eq!(program.num_measurements(), 10);
//! assert_eq!(program.num_detectors(), 10);
//! assert!(program.validate_records().is_ok());
//! ```
//!
//! # Instructions
//!
//! | Name | Targets | Description |
//! |------|---------|-------------|
//! | `H` | qubits | Hadamard |
//! | `CX` | qubit pairs | CNOT |
//! | `R`, `RX` | qubits | Reset in Z / X |
//! | `M`, `MX` | qubits | Measure in Z / X |
//! | `MR`, `MRX` | qubits | Measure then reset |
//! | `DEPOLARIZE1`, `DEPOLARIZE2` | qubits / pairs | Depolarizing noise |
//! | `X_ERROR`, `Z_ERROR` | qubits | Bit / phase flip |
//! | `DETECTOR`, `OBSERVABLE_INCLUDE` | records | Parity annotations |
//! | `QUBIT_COORDS`, `SHIFT_COORDS`, `TICK` | - | Layout annotations |

pub mod basis;
pub mod circuit;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod noise;
pub mod qubit;

pub use basis::Basis;
pub use circuit::{Circuit, Operation};
pub use error::{IrError, IrResult};
pub use gate::StandardGate;
pub use instruction::{Instruction, InstructionKind};
pub use noise::NoiseModel;
pub use qubit::{QubitId, RecordOffset};
