//! Unrotated planar surface code and toric code.

use std::collections::BTreeSet;
use tracing::debug;

use super::Layout;
use crate::coord::{Coord, CoordIndexer};
use crate::error::{GenError, GenResult};

/// Interaction order shared by both measurement types.
const ORDER: [Coord; 4] = [
    Coord::new(1, 0),
    Coord::new(0, 1),
    Coord::new(0, -1),
    Coord::new(-1, 0),
];

impl Layout {
    /// Build an unrotated square patch.
    ///
    /// Sites with odd `x + y` are measurement qubits (Z type on even
    /// columns, X type on odd columns); all others hold data. The planar
    /// patch has side `2d - 1`; the toric patch has side `2d` and folds
    /// out-of-range neighbours back onto the torus.
    pub fn unrotated(distance: u32, is_toric: bool) -> GenResult<Self> {
        if distance < 2 {
            return Err(GenError::InvalidDistance(distance));
        }
        let d = i32::try_from(distance).map_err(|_| GenError::InvalidDistance(distance))?;
        let length = if is_toric { 2 * d } else { 2 * d - 1 };

        let mut data_coords = BTreeSet::new();
        let mut x_measure_coords = BTreeSet::new();
        let mut z_measure_coords = BTreeSet::new();
        let mut x_observable = Vec::new();
        let mut z_observable = Vec::new();
        for x in 0..length {
            for y in 0..length {
                let q = Coord::new(x, y);
                if x % 2 != y % 2 {
                    if x % 2 == 0 {
                        z_measure_coords.insert(q);
                    } else {
                        x_measure_coords.insert(q);
                    }
                } else {
                    data_coords.insert(q);
                    if x == 0 {
                        x_observable.push(q);
                    }
                    if y == 0 {
                        z_observable.push(q);
                    }
                }
            }
        }

        debug!(
            distance,
            is_toric,
            data = data_coords.len(),
            x_measure = x_measure_coords.len(),
            z_measure = z_measure_coords.len(),
            "built unrotated lattice"
        );

        Ok(Layout {
            data_coords,
            x_measure_coords,
            z_measure_coords,
            x_order: ORDER,
            z_order: ORDER,
            x_observable,
            z_observable,
            indexer: CoordIndexer::Unrotated { length },
            wraparound: is_toric.then_some(2 * d),
        })
    }
}
