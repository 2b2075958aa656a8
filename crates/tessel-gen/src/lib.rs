//! `tessel-gen`: surface and toric code memory experiments.
//!
//! Builds noisy stabilizer programs that store one logical qubit for a
//! number of syndrome rounds, complete with the `DETECTOR` and
//! `OBSERVABLE_INCLUDE` annotations a decoder needs:
//!
//! - **Rotated planar** surface code (optionally rectangular)
//! - **Unrotated planar** surface code
//! - **Toric** code (unrotated, periodic)
//!
//! Each can be run as a memory experiment in the X or the Z basis.
//!
//! # Quick start
//!
//! ```rust
//! use tessel_gen::{CircuitGenParameters, generate_circuit};
//!
//! let params = CircuitGenParameters::new(3, 5).with_noise(0.001, 0.001, 0.001, 0.001);
//! let circuit = generate_circuit("surface_code:rotated_memory_z", &params).unwrap();
//!
//! // 9 data + 8 measurement qubits, 8 results per round plus the final data readout
//! assert_eq!(circuit.num_measurements(), 8 * 5 + 9);
//! assert_eq!(circuit.num_observables(), 1);
//! ```

pub mod assembler;
pub mod coord;
pub mod error;
pub mod generate;
pub mod lattice;
pub mod noise;
pub mod params;
pub mod task;

pub use assembler::finish_surface_code_circuit;
pub use coord::{Coord, CoordIndexer};
pub use error::{GenError, GenResult};
pub use generate::{generate_circuit, generate_from_task};
pub use lattice::Layout;
pub use noise::{NoiseInjector, anti_basis_error};
pub use params::CircuitGenParameters;
pub use task::{CodeFamily, CodeTask, MemoryTask};
