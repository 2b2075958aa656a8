//! Assembly of a full memory experiment from a lattice layout.
//!
//! The program has three parts:
//!
//! - **head**: qubit coordinates, initial resets, one syndrome round and the
//!   first detectors, which compare memory-basis stabilizers against their
//!   deterministic initial value;
//! - **body**: `rounds - 1` further syndrome rounds, each comparing every
//!   stabilizer with its value one round earlier;
//! - **tail**: transversal data measurement, detectors rebuilding each
//!   memory-basis stabilizer from data results, and the logical observable.

use rustc_hash::FxHashMap;
use std::collections::{BTreeMap, BTreeSet};
use tessel_ir::{Basis, Circuit, QubitId, RecordOffset, StandardGate};
use tracing::debug;

use crate::coord::Coord;
use crate::error::{GenError, GenResult};
use crate::lattice::Layout;
use crate::noise::NoiseInjector;
use crate::params::CircuitGenParameters;

/// Qubit indices of a layout and the positions of each qubit inside the
/// measurement instructions that define the record layout.
struct QubitTables {
    p2q: FxHashMap<Coord, u32>,
    q2p: BTreeMap<u32, Coord>,
    data_qubits: Vec<QubitId>,
    measurement_qubits: Vec<QubitId>,
    x_measurement_qubits: Vec<QubitId>,
    data_order: FxHashMap<Coord, usize>,
    measure_order: FxHashMap<Coord, usize>,
}

impl QubitTables {
    fn build(layout: &Layout) -> GenResult<Self> {
        let mut p2q = FxHashMap::default();
        let mut q2p = BTreeMap::new();
        let all = layout
            .data_coords
            .iter()
            .chain(&layout.x_measure_coords)
            .chain(&layout.z_measure_coords);
        for &coord in all {
            let index = layout
                .indexer
                .index(coord)
                .ok_or(GenError::UnindexableCoordinate(coord))?;
            if let Some(first) = q2p.insert(index, coord) {
                return Err(GenError::IndexCollision {
                    index,
                    first,
                    second: coord,
                });
            }
            p2q.insert(coord, index);
        }

        let data_qubits = sorted_qubits(&p2q, layout.data_coords.iter())?;
        let measurement_qubits = sorted_qubits(
            &p2q,
            layout
                .x_measure_coords
                .iter()
                .chain(&layout.z_measure_coords),
        )?;
        let x_measurement_qubits = sorted_qubits(&p2q, layout.x_measure_coords.iter())?;

        let data_order = position_table(&q2p, &data_qubits)?;
        let measure_order = position_table(&q2p, &measurement_qubits)?;

        Ok(Self {
            p2q,
            q2p,
            data_qubits,
            measurement_qubits,
            x_measurement_qubits,
            data_order,
            measure_order,
        })
    }

    fn qubit(&self, coord: Coord) -> GenResult<QubitId> {
        self.p2q
            .get(&coord)
            .map(|&index| QubitId(index))
            .ok_or(GenError::MissingCoordinate {
                coord,
                table: "qubit index",
            })
    }

    fn coord(&self, qubit: QubitId) -> GenResult<Coord> {
        self.q2p
            .get(&qubit.0)
            .copied()
            .ok_or(GenError::MissingQubit(qubit.0))
    }

    fn data_position(&self, coord: Coord) -> GenResult<usize> {
        self.data_order
            .get(&coord)
            .copied()
            .ok_or(GenError::MissingCoordinate {
                coord,
                table: "data measurement order",
            })
    }

    fn measure_position(&self, coord: Coord) -> GenResult<usize> {
        self.measure_order
            .get(&coord)
            .copied()
            .ok_or(GenError::MissingCoordinate {
                coord,
                table: "syndrome measurement order",
            })
    }
}

/// Qubits of the given sites, in ascending index order.
fn sorted_qubits<'a>(
    p2q: &FxHashMap<Coord, u32>,
    coords: impl Iterator<Item = &'a Coord>,
) -> GenResult<Vec<QubitId>> {
    let mut indices = coords
        .map(|&coord| {
            p2q.get(&coord).copied().ok_or(GenError::MissingCoordinate {
                coord,
                table: "qubit index",
            })
        })
        .collect::<GenResult<Vec<u32>>>()?;
    indices.sort_unstable();
    Ok(indices.into_iter().map(QubitId).collect())
}

/// Position of each qubit's site within `qubits`.
fn position_table(
    q2p: &BTreeMap<u32, Coord>,
    qubits: &[QubitId],
) -> GenResult<FxHashMap<Coord, usize>> {
    qubits
        .iter()
        .enumerate()
        .map(|(position, q)| {
            q2p.get(&q.0)
                .map(|&coord| (coord, position))
                .ok_or(GenError::MissingQubit(q.0))
        })
        .collect()
}

/// The site actually touched by a neighbour offset: the offset site itself if
/// it is on the lattice, its torus image on a periodic lattice, and nothing
/// past a planar boundary.
fn neighbour(layout: &Layout, tables: &QubitTables, site: Coord) -> Option<Coord> {
    if tables.p2q.contains_key(&site) {
        Some(site)
    } else {
        layout.wraparound.map(|period| site.wrapped(period))
    }
}

fn rec(offset: i64) -> GenResult<RecordOffset> {
    Ok(RecordOffset::from_i64(offset)?)
}

fn len_i64(len: usize) -> GenResult<i64> {
    i64::try_from(len).map_err(|_| GenError::LatticeTooLarge(len))
}

/// Turn a lattice layout into a complete memory experiment in `basis`.
pub fn finish_surface_code_circuit(
    layout: &Layout,
    params: &CircuitGenParameters,
    basis: Basis,
) -> GenResult<Circuit> {
    if params.rounds < 1 {
        return Err(GenError::InvalidRounds(params.rounds));
    }
    if params.distance < 2 {
        return Err(GenError::InvalidDistance(params.distance));
    }

    let (chosen_observable, chosen_measure_coords): (&[Coord], &BTreeSet<Coord>) = match basis {
        Basis::X => (layout.x_observable.as_slice(), &layout.x_measure_coords),
        Basis::Z => (layout.z_observable.as_slice(), &layout.z_measure_coords),
    };

    let tables = QubitTables::build(layout)?;
    let noise = NoiseInjector::new(params);
    let num_data = len_i64(tables.data_qubits.len())?;
    let num_measure = len_i64(tables.measurement_qubits.len())?;

    // CNOT layers: X-type measurement qubits control, Z-type ones are targets.
    let mut cnot_targets: [Vec<QubitId>; 4] = Default::default();
    for (k, targets) in cnot_targets.iter_mut().enumerate() {
        for &measure in &layout.x_measure_coords {
            if let Some(data) = neighbour(layout, &tables, measure + layout.x_order[k]) {
                targets.push(tables.qubit(measure)?);
                targets.push(tables.qubit(data)?);
            }
        }
        for &measure in &layout.z_measure_coords {
            if let Some(data) = neighbour(layout, &tables, measure + layout.z_order[k]) {
                targets.push(tables.qubit(data)?);
                targets.push(tables.qubit(measure)?);
            }
        }
    }

    // One syndrome round.
    let mut cycle = Circuit::new();
    noise.begin_round_tick(&mut cycle, &tables.data_qubits)?;
    noise.unitary_1(&mut cycle, StandardGate::H, &tables.x_measurement_qubits)?;
    for targets in &cnot_targets {
        cycle.tick()?;
        noise.unitary_2(&mut cycle, StandardGate::CX, targets)?;
    }
    cycle.tick()?;
    noise.unitary_1(&mut cycle, StandardGate::H, &tables.x_measurement_qubits)?;
    cycle.tick()?;
    noise.measure_reset(&mut cycle, &tables.measurement_qubits, Basis::Z)?;

    // Head: initialisation and the first round.
    let mut head = Circuit::new();
    for (&index, coord) in &tables.q2p {
        head.qubit_coords(QubitId(index), &coord.to_args())?;
    }
    noise.reset(&mut head, &tables.data_qubits, basis)?;
    noise.reset(&mut head, &tables.measurement_qubits, Basis::Z)?;
    head += &cycle;
    for &measure in chosen_measure_coords {
        let position = len_i64(tables.measure_position(measure)?)?;
        head.detector(
            [rec(-num_measure + position)?],
            &[f64::from(measure.x), f64::from(measure.y), 0.0],
        )?;
    }

    // Body: each further round compares against the previous one.
    let mut body = cycle.clone();
    body.shift_coords(&[0.0, 0.0, 1.0])?;
    for (position, &q) in tables.measurement_qubits.iter().enumerate() {
        let coord = tables.coord(q)?;
        if params.exclude_other_basis_detectors && !chosen_measure_coords.contains(&coord) {
            continue;
        }
        let current = len_i64(position)? - num_measure;
        body.detector(
            [rec(current)?, rec(current - num_measure)?],
            &[f64::from(coord.x), f64::from(coord.y), 0.0],
        )?;
    }

    // Tail: measure the data and close out the experiment.
    let mut tail = Circuit::new();
    noise.measure(&mut tail, &tables.data_qubits, basis)?;
    for &measure in chosen_measure_coords {
        let mut offsets = Vec::with_capacity(5);
        for delta in layout.z_order {
            if let Some(data) = neighbour(layout, &tables, measure + delta) {
                offsets.push(-num_data + len_i64(tables.data_position(data)?)?);
            }
        }
        offsets.push(-num_data - num_measure + len_i64(tables.measure_position(measure)?)?);
        offsets.sort_unstable_by(|a, b| b.cmp(a));
        let records = offsets.into_iter().map(rec).collect::<GenResult<Vec<_>>>()?;
        tail.detector(records, &[f64::from(measure.x), f64::from(measure.y), 1.0])?;
    }
    let mut observable = chosen_observable
        .iter()
        .map(|&q| Ok(-num_data + len_i64(tables.data_position(q)?)?))
        .collect::<GenResult<Vec<i64>>>()?;
    observable.sort_unstable_by(|a, b| b.cmp(a));
    let records = observable.into_iter().map(rec).collect::<GenResult<Vec<_>>>()?;
    tail.observable_include(0, records)?;

    let circuit = head + body.repeated(u64::from(params.rounds - 1)) + tail;
    debug!(
        basis = %basis,
        rounds = params.rounds,
        num_qubits = circuit.num_qubits(),
        num_measurements = circuit.num_measurements(),
        num_detectors = circuit.num_detectors(),
        "assembled memory experiment"
    );
    Ok(circuit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::CoordIndexer;

    #[test]
    fn test_index_collision_reported() {
        let mut layout = Layout::rotated(2, 2).unwrap();
        // Squash every row onto row zero.
        layout.indexer = CoordIndexer::Unrotated { length: 0 };
        let params = CircuitGenParameters::new(2, 2);
        assert!(matches!(
            finish_surface_code_circuit(&layout, &params, Basis::Z),
            Err(GenError::IndexCollision { .. })
        ));
    }

    #[test]
    fn test_missing_toric_partner_reported() {
        let mut layout = Layout::unrotated(2, false).unwrap();
        // A period that folds neighbours onto measurement sites.
        layout.wraparound = Some(3);
        let params = CircuitGenParameters::new(2, 1);
        assert!(matches!(
            finish_surface_code_circuit(&layout, &params, Basis::Z),
            Err(GenError::MissingCoordinate { .. })
        ));
    }

    #[test]
    fn test_unknown_qubit_reported() {
        let tables = QubitTables::build(&Layout::rotated(3, 3).unwrap()).unwrap();
        let first = tables.measurement_qubits[0];
        assert!(tables.coord(first).is_ok());
        assert!(matches!(
            tables.coord(QubitId(9999)),
            Err(GenError::MissingQubit(9999))
        ));
        assert!(matches!(
            position_table(&tables.q2p, &[first, QubitId(9999)]),
            Err(GenError::MissingQubit(9999))
        ));
    }

    #[test]
    fn test_unknown_site_reported() {
        let tables = QubitTables::build(&Layout::rotated(3, 3).unwrap()).unwrap();
        let off_lattice = [Coord { x: -7, y: -7 }];
        assert!(matches!(
            sorted_qubits(&tables.p2q, off_lattice.iter()),
            Err(GenError::MissingCoordinate { .. })
        ));
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_oversized_record_count_reported() {
        assert_eq!(len_i64(17).unwrap(), 17);
        assert!(matches!(
            len_i64(usize::MAX),
            Err(GenError::LatticeTooLarge(usize::MAX))
        ));
    }

    #[test]
    fn test_rounds_checked() {
        let layout = Layout::rotated(3, 3).unwrap();
        let params = CircuitGenParameters::new(3, 0);
        assert!(matches!(
            finish_surface_code_circuit(&layout, &params, Basis::X),
            Err(GenError::InvalidRounds(0))
        ));
    }

    #[test]
    fn test_single_round_has_no_repeat() {
        let layout = Layout::rotated(3, 3).unwrap();
        let params = CircuitGenParameters::new(3, 1);
        let circuit = finish_surface_code_circuit(&layout, &params, Basis::Z).unwrap();
        assert!(
            circuit
                .operations()
                .iter()
                .all(|op| matches!(op, tessel_ir::Operation::Instruction(_)))
        );
        // 4 head detectors + 4 tail detectors
        assert_eq!(circuit.num_detectors(), 8);
        assert!(circuit.validate_records().is_ok());
    }
}
