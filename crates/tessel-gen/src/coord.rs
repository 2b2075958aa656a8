//! Integer lattice coordinates and the coordinate → qubit index maps.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

/// A lattice site.
///
/// Ordering is by `x` then `y`. All sites of both lattice families have
/// integer coordinates, so membership tests never compare floats.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Fold onto the periodic torus of side `period`.
    pub fn wrapped(self, period: i32) -> Self {
        Self {
            x: self.x.rem_euclid(period),
            y: self.y.rem_euclid(period),
        }
    }

    /// The coordinate pair as instruction arguments.
    pub fn to_args(self) -> [f64; 2] {
        [f64::from(self.x), f64::from(self.y)]
    }
}

impl Add for Coord {
    type Output = Coord;

    fn add(self, rhs: Coord) -> Coord {
        Coord::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Injective map from the sites of one lattice to qubit indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoordIndexer {
    /// Rotated layout: odd columns are shifted down one row, then rows of
    /// `2 * z_distance + 1` sites are numbered consecutively.
    Rotated { z_distance: i32 },
    /// Square grid numbered row by row.
    Unrotated { length: i32 },
}

impl CoordIndexer {
    /// Qubit index of a site, or `None` if the site has no index.
    pub fn index(&self, coord: Coord) -> Option<u32> {
        let index = match *self {
            CoordIndexer::Rotated { z_distance } => {
                let y = coord.y - coord.x.rem_euclid(2);
                i64::from(coord.x) + i64::from(y.div_euclid(2)) * (2 * i64::from(z_distance) + 1)
            }
            CoordIndexer::Unrotated { length } => {
                i64::from(coord.x) + i64::from(coord.y) * i64::from(length)
            }
        };
        u32::try_from(index).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_is_x_then_y() {
        let mut coords = vec![Coord::new(2, 0), Coord::new(0, 4), Coord::new(0, 2)];
        coords.sort();
        assert_eq!(
            coords,
            vec![Coord::new(0, 2), Coord::new(0, 4), Coord::new(2, 0)]
        );
    }

    #[test]
    fn test_wrapped_handles_negative() {
        assert_eq!(Coord::new(-1, 3).wrapped(4), Coord::new(3, 3));
        assert_eq!(Coord::new(4, -2).wrapped(4), Coord::new(0, 2));
    }

    #[test]
    fn test_rotated_index() {
        let indexer = CoordIndexer::Rotated { z_distance: 2 };
        assert_eq!(indexer.index(Coord::new(1, 1)), Some(1));
        assert_eq!(indexer.index(Coord::new(2, 0)), Some(2));
        assert_eq!(indexer.index(Coord::new(3, 3)), Some(8));
        assert_eq!(indexer.index(Coord::new(2, 4)), Some(12));
    }

    #[test]
    fn test_unrotated_index() {
        let indexer = CoordIndexer::Unrotated { length: 5 };
        assert_eq!(indexer.index(Coord::new(3, 2)), Some(13));
        assert_eq!(indexer.index(Coord::new(0, -1)), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Coord::new(2, -4).to_string(), "(2, -4)");
    }
}
