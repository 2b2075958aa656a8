//! Lattice descriptions for the supported code families.
//!
//! A [`Layout`] lists the three kinds of sites (data, X-type measurement,
//! Z-type measurement), the CNOT interaction orders used by each measurement
//! type, the two logical observable chains and the coordinate → index map.
//! The circuit assembler only ever consumes a `Layout`, so both lattice
//! families share one assembly path.

mod rotated;
mod unrotated;

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::coord::{Coord, CoordIndexer};

/// The geometry of one surface or toric code patch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    /// Data qubit sites.
    pub data_coords: BTreeSet<Coord>,
    /// Sites of measurement qubits checking X-type stabilizers.
    pub x_measure_coords: BTreeSet<Coord>,
    /// Sites of measurement qubits checking Z-type stabilizers.
    pub z_measure_coords: BTreeSet<Coord>,
    /// Offset from an X-type measurement qubit to its partner at each CNOT layer.
    pub x_order: [Coord; 4],
    /// Offset from a Z-type measurement qubit to its partner at each CNOT layer.
    pub z_order: [Coord; 4],
    /// Data qubits whose X-basis parity is the logical X observable.
    pub x_observable: Vec<Coord>,
    /// Data qubits whose Z-basis parity is the logical Z observable.
    pub z_observable: Vec<Coord>,
    /// Coordinate → qubit index map.
    pub indexer: CoordIndexer,
    /// Side of the periodic torus, for lattices without boundary.
    pub wraparound: Option<i32>,
}

impl Layout {
    /// Number of data qubits.
    pub fn num_data(&self) -> usize {
        self.data_coords.len()
    }

    /// Number of measurement qubits of both types.
    pub fn num_measure(&self) -> usize {
        self.x_measure_coords.len() + self.z_measure_coords.len()
    }

    /// Whether the lattice is periodic.
    pub fn is_toric(&self) -> bool {
        self.wraparound.is_some()
    }
}
