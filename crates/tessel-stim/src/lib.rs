//! Stim circuit text for tessel
//!
//! This crate reads and writes the stim circuit text format used by
//! stabilizer simulators and decoders.
//!
//! # Supported Features
//!
//! | Feature | Status | Example |
//! |---------|--------|---------|
//! | Gates | ✅ | `H 1 3`, `CX 2 3 8 7` |
//! | Resets and measurements | ✅ | `R 0`, `MX 1`, `MR 2 7 12` |
//! | Noise channels | ✅ | `DEPOLARIZE2(0.001) 2 3` |
//! | Annotations | ✅ | `DETECTOR(2, 2, 0) rec[-1] rec[-4]` |
//! | Repeat blocks | ✅ | `REPEAT 9 { ... }` |
//! | Aliases | ✅ | `CNOT`, `ZCX`, `RZ`, `MZ`, `MRZ` |
//! | Comments | ✅ | `# comment` |
//!
//! # Example: Round-Trip
//!
//! ```rust
//! use tessel_stim::{emit, parse};
//!
//! let text = "\
//! R 0 1
//! TICK
//! CX 0 1
//! M 1
//! DETECTOR(1, 0, 0) rec[-1]
//! ";
//!
//! let circuit = parse(text).unwrap();
//! assert_eq!(circuit.num_measurements(), 1);
//! assert_eq!(emit(&circuit), text);
//! ```

pub mod emitter;
pub mod error;
pub mod lexer;
pub mod parser;

pub use emitter::emit;
pub use error::{ParseError, ParseResult};
pub use parser::parse;
