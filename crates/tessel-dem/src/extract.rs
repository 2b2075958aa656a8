//! Error-model extraction by backward Pauli-frame propagation.
//!
//! A forward pass resolves every detector and observable into absolute
//! measurement indices. A backward pass then tracks, per qubit, which
//! detectors and observables an X or a Z error at the current point would
//! flip. Each noise channel met on the way is turned into mechanisms from
//! that state.

use std::collections::BTreeMap;
use std::mem;

use tessel_ir::{Basis, Circuit, Instruction, InstructionKind, NoiseModel, StandardGate};
use tracing::debug;

use crate::error::{DemError, DemResult};
use crate::model::{DetectorErrorModel, ErrorMechanism};

/// Sorted set of symbols: detectors first, then observables offset by the
/// detector count.
type Symbols = Vec<u32>;

/// `dst ^= src` for sorted symbol sets.
fn xor_into(dst: &mut Symbols, src: &[u32]) {
    if src.is_empty() {
        return;
    }
    let mut out = Vec::with_capacity(dst.len() + src.len());
    let (mut i, mut j) = (0, 0);
    while i < dst.len() && j < src.len() {
        match dst[i].cmp(&src[j]) {
            std::cmp::Ordering::Less => {
                out.push(dst[i]);
                i += 1;
            }
            std::cmp::Ordering::Greater => {
                out.push(src[j]);
                j += 1;
            }
            std::cmp::Ordering::Equal => {
                i += 1;
                j += 1;
            }
        }
    }
    out.extend_from_slice(&dst[i..]);
    out.extend_from_slice(&src[j..]);
    *dst = out;
}

fn xor(a: &[u32], b: &[u32]) -> Symbols {
    let mut out = a.to_vec();
    xor_into(&mut out, b);
    out
}

/// Probability of each of the X, Y and Z components when `DEPOLARIZE1(p)` is
/// rewritten as three independent channels.
fn depolarize1_component(p: f64) -> f64 {
    0.5 - 0.5 * (1.0 - 4.0 * p / 3.0).max(0.0).sqrt()
}

/// Probability of each of the 15 components when `DEPOLARIZE2(p)` is
/// rewritten as independent channels.
fn depolarize2_component(p: f64) -> f64 {
    0.5 - 0.5 * (1.0 - 16.0 * p / 15.0).max(0.0).powf(0.125)
}

/// Results of the forward pass.
struct RecordMap {
    num_measurements: usize,
    num_detectors: u32,
    num_observables: u32,
    /// Symbols each measurement result feeds into.
    listeners: Vec<Symbols>,
    detector_coordinates: Vec<Vec<f64>>,
}

fn resolve(
    inst: &Instruction,
    measured: usize,
    out: &mut Vec<usize>,
) -> DemResult<()> {
    for record in &inst.records {
        let back = record.get().unsigned_abs() as usize;
        let absolute = measured
            .checked_sub(back)
            .ok_or(DemError::RecordOutOfRange {
                offset: record.get(),
                available: measured as u64,
            })?;
        out.push(absolute);
    }
    Ok(())
}

fn map_records(flat: &[Instruction]) -> DemResult<RecordMap> {
    let mut measured = 0usize;
    let mut detectors: Vec<Vec<usize>> = Vec::new();
    let mut detector_coordinates = Vec::new();
    let mut observables: BTreeMap<u32, Vec<usize>> = BTreeMap::new();
    let mut shift: Vec<f64> = Vec::new();

    for inst in flat {
        match inst.kind {
            InstructionKind::Detector => {
                let mut records = Vec::with_capacity(inst.records.len());
                resolve(inst, measured, &mut records)?;
                detectors.push(records);
                let coords = inst
                    .args
                    .iter()
                    .enumerate()
                    .map(|(i, c)| c + shift.get(i).copied().unwrap_or(0.0))
                    .collect();
                detector_coordinates.push(coords);
            }
            InstructionKind::ObservableInclude(index) => {
                resolve(inst, measured, observables.entry(index).or_default())?;
            }
            InstructionKind::ShiftCoords => {
                if shift.len() < inst.args.len() {
                    shift.resize(inst.args.len(), 0.0);
                }
                for (s, a) in shift.iter_mut().zip(&inst.args) {
                    *s += a;
                }
            }
            _ => measured += inst.num_measurements() as usize,
        }
    }

    let num_detectors =
        u32::try_from(detectors.len()).map_err(|_| DemError::TooManyDetectors(detectors.len()))?;
    let num_observables = observables.keys().next_back().map_or(0, |&k| k + 1);

    let mut listeners = vec![Symbols::new(); measured];
    for (d, records) in (0u32..).zip(&detectors) {
        for &m in records {
            xor_into(&mut listeners[m], &[d]);
        }
    }
    for (&k, records) in &observables {
        for &m in records {
            xor_into(&mut listeners[m], &[num_detectors + k]);
        }
    }

    Ok(RecordMap {
        num_measurements: measured,
        num_detectors,
        num_observables,
        listeners,
        detector_coordinates,
    })
}

/// Backward-propagated sensitivities and the mechanisms found so far.
struct Frame {
    xs: Vec<Symbols>,
    zs: Vec<Symbols>,
    mechanisms: BTreeMap<Symbols, f64>,
}

impl Frame {
    fn add(&mut self, symbols: Symbols, p: f64) {
        if symbols.is_empty() || p <= 0.0 {
            return;
        }
        self.mechanisms
            .entry(symbols)
            .and_modify(|q| *q = *q * (1.0 - p) + p * (1.0 - *q))
            .or_insert(p);
    }

    /// Symptoms of Pauli `code` on `qubit`: 0 = I, 1 = X, 2 = Z, 3 = Y.
    fn pauli(&self, qubit: usize, code: u8) -> Symbols {
        match code & 3 {
            1 => self.xs[qubit].clone(),
            2 => self.zs[qubit].clone(),
            3 => xor(&self.xs[qubit], &self.zs[qubit]),
            _ => Symbols::new(),
        }
    }

    fn noise(&mut self, model: NoiseModel, qubits: &[usize]) {
        match model {
            NoiseModel::BitFlip { p } => {
                for &q in qubits {
                    self.add(self.xs[q].clone(), p);
                }
            }
            NoiseModel::PhaseFlip { p } => {
                for &q in qubits {
                    self.add(self.zs[q].clone(), p);
                }
            }
            NoiseModel::Depolarize1 { p } => {
                let component = depolarize1_component(p);
                for &q in qubits {
                    for code in 1..4 {
                        self.add(self.pauli(q, code), component);
                    }
                }
            }
            NoiseModel::Depolarize2 { p } => {
                let component = depolarize2_component(p);
                for pair in qubits.chunks_exact(2) {
                    for code in 1u8..16 {
                        let symptoms = xor(&self.pauli(pair[0], code), &self.pauli(pair[1], code >> 2));
                        self.add(symptoms, component);
                    }
                }
            }
        }
    }
}

/// Extract the detector error model of a noisy program.
pub fn from_circuit(circuit: &Circuit) -> DemResult<DetectorErrorModel> {
    let flat = circuit.flatten();
    let records = map_records(&flat)?;
    let num_qubits = circuit.num_qubits() as usize;

    let mut frame = Frame {
        xs: vec![Symbols::new(); num_qubits],
        zs: vec![Symbols::new(); num_qubits],
        mechanisms: BTreeMap::new(),
    };
    let mut next_measurement = records.num_measurements;

    for inst in flat.iter().rev() {
        let qubits: Vec<usize> = inst.qubits.iter().map(|q| q.0 as usize).collect();
        match inst.kind {
            InstructionKind::Measure(basis) => {
                for &q in qubits.iter().rev() {
                    next_measurement -= 1;
                    let listeners = &records.listeners[next_measurement];
                    match basis {
                        Basis::Z => xor_into(&mut frame.xs[q], listeners),
                        Basis::X => xor_into(&mut frame.zs[q], listeners),
                    }
                }
            }
            InstructionKind::MeasureReset(basis) => {
                for &q in qubits.iter().rev() {
                    next_measurement -= 1;
                    let listeners = records.listeners[next_measurement].clone();
                    let (flips, other) = match basis {
                        Basis::Z => (&mut frame.xs[q], &mut frame.zs[q]),
                        Basis::X => (&mut frame.zs[q], &mut frame.xs[q]),
                    };
                    *flips = listeners;
                    other.clear();
                }
            }
            InstructionKind::Reset(_) => {
                for &q in &qubits {
                    frame.xs[q].clear();
                    frame.zs[q].clear();
                }
            }
            InstructionKind::Gate(StandardGate::H) => {
                for &q in &qubits {
                    mem::swap(&mut frame.xs[q], &mut frame.zs[q]);
                }
            }
            InstructionKind::Gate(StandardGate::CX) => {
                for pair in qubits.chunks_exact(2).rev() {
                    let (control, target) = (pair[0], pair[1]);
                    let target_x = frame.xs[target].clone();
                    xor_into(&mut frame.xs[control], &target_x);
                    let control_z = frame.zs[control].clone();
                    xor_into(&mut frame.zs[target], &control_z);
                }
            }
            InstructionKind::NoiseChannel(model) => frame.noise(model, &qubits),
            _ => {}
        }
    }

    let num_detectors = records.num_detectors;
    let mechanisms: Vec<ErrorMechanism> = frame
        .mechanisms
        .into_iter()
        .map(|(symbols, probability)| {
            let split = symbols.partition_point(|&s| s < num_detectors);
            ErrorMechanism {
                probability,
                detectors: symbols[..split].to_vec(),
                observables: symbols[split..].iter().map(|s| s - num_detectors).collect(),
            }
        })
        .collect();

    debug!(
        num_detectors,
        num_observables = records.num_observables,
        num_mechanisms = mechanisms.len(),
        "extracted detector error model"
    );

    Ok(DetectorErrorModel {
        num_detectors,
        num_observables: records.num_observables,
        detector_coordinates: records.detector_coordinates,
        mechanisms,
    })
}
