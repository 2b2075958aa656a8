//! Rotated planar surface code.

use std::collections::BTreeSet;
use tracing::debug;

use super::Layout;
use crate::coord::{Coord, CoordIndexer};
use crate::error::{GenError, GenResult};

/// CNOT offsets, chosen so hook errors run transverse to the logical chains.
const Z_ORDER: [Coord; 4] = [
    Coord::new(1, 1),
    Coord::new(1, -1),
    Coord::new(-1, 1),
    Coord::new(-1, -1),
];
const X_ORDER: [Coord; 4] = [
    Coord::new(1, 1),
    Coord::new(-1, 1),
    Coord::new(1, -1),
    Coord::new(-1, -1),
];

fn checked_distance(distance: u32) -> GenResult<i32> {
    if distance < 2 {
        return Err(GenError::InvalidDistance(distance));
    }
    i32::try_from(distance).map_err(|_| GenError::InvalidDistance(distance))
}

impl Layout {
    /// Build a rotated surface code patch.
    ///
    /// Data qubits sit at odd coordinates `(2i + 1, 2j + 1)` with
    /// `i < z_distance` and `j < x_distance`; measurement qubits sit at even
    /// coordinates, checkerboarded into X and Z types and truncated at the
    /// boundaries. The Z observable runs along the bottom row
    /// (`z_distance` qubits) and the X observable along the left column
    /// (`x_distance` qubits).
    pub fn rotated(x_distance: u32, z_distance: u32) -> GenResult<Self> {
        let d_x = checked_distance(x_distance)?;
        let d_z = checked_distance(z_distance)?;

        let mut data_coords = BTreeSet::new();
        let mut x_observable = Vec::new();
        let mut z_observable = Vec::new();
        for i in 0..d_z {
            for j in 0..d_x {
                let q = Coord::new(2 * i + 1, 2 * j + 1);
                data_coords.insert(q);
                if j == 0 {
                    z_observable.push(q);
                }
                if i == 0 {
                    x_observable.push(q);
                }
            }
        }

        let mut x_measure_coords = BTreeSet::new();
        let mut z_measure_coords = BTreeSet::new();
        for x in 0..=d_z {
            for y in 0..=d_x {
                let q = Coord::new(2 * x, 2 * y);
                let on_side_boundary = x == 0 || x == d_z;
                let on_top_boundary = y == 0 || y == d_x;
                let parity = x % 2 != y % 2;
                if on_side_boundary && parity {
                    continue;
                }
                if on_top_boundary && !parity {
                    continue;
                }
                if parity {
                    x_measure_coords.insert(q);
                } else {
                    z_measure_coords.insert(q);
                }
            }
        }

        debug!(
            x_distance,
            z_distance,
            data = data_coords.len(),
            x_measure = x_measure_coords.len(),
            z_measure = z_measure_coords.len(),
            "built rotated lattice"
        );

        Ok(Layout {
            data_coords,
            x_measure_coords,
            z_measure_coords,
            x_order: X_ORDER,
            z_order: Z_ORDER,
            x_observable,
            z_observable,
            indexer: CoordIndexer::Rotated { z_distance: d_z },
            wraparound: None,
        })
    }
}
