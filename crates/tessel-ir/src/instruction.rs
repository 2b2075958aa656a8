//! Program instructions combining an operation kind with its targets.

use serde::{Deserialize, Serialize};

use crate::basis::Basis;
use crate::error::{IrError, IrResult};
use crate::gate::StandardGate;
use crate::noise::NoiseModel;
use crate::qubit::{QubitId, RecordOffset};

/// The kind of instruction in a program.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InstructionKind {
    /// A Clifford gate.
    Gate(StandardGate),
    /// Reset qubits into the +1 eigenstate of a basis.
    Reset(Basis),
    /// Measure qubits in a basis, appending one result per qubit to the record.
    Measure(Basis),
    /// Measure then reset in the same basis.
    MeasureReset(Basis),
    /// Pauli noise channel.
    NoiseChannel(NoiseModel),
    /// Layer separator.
    Tick,
    /// Attach coordinates (`args`) to a qubit.
    QubitCoords,
    /// Declare a parity check over measurement results.
    Detector,
    /// Offset the coordinates of subsequent annotations by `args`.
    ShiftCoords,
    /// Add measurement results to a logical observable.
    ObservableInclude(u32),
}

impl InstructionKind {
    /// Canonical instruction name.
    pub fn name(&self) -> &'static str {
        match self {
            InstructionKind::Gate(gate) => gate.name(),
            InstructionKind::Reset(Basis::Z) => "R",
            InstructionKind::Reset(Basis::X) => "RX",
            InstructionKind::Measure(Basis::Z) => "M",
            InstructionKind::Measure(Basis::X) => "MX",
            InstructionKind::MeasureReset(Basis::Z) => "MR",
            InstructionKind::MeasureReset(Basis::X) => "MRX",
            InstructionKind::NoiseChannel(model) => model.name(),
            InstructionKind::Tick => "TICK",
            InstructionKind::QubitCoords => "QUBIT_COORDS",
            InstructionKind::Detector => "DETECTOR",
            InstructionKind::ShiftCoords => "SHIFT_COORDS",
            InstructionKind::ObservableInclude(_) => "OBSERVABLE_INCLUDE",
        }
    }

    /// Whether consecutive instructions of this kind may be merged into one.
    ///
    /// Annotations never fuse: each one carries its own coordinates or records.
    pub fn is_fusable(&self) -> bool {
        matches!(
            self,
            InstructionKind::Gate(_)
                | InstructionKind::Reset(_)
                | InstructionKind::Measure(_)
                | InstructionKind::MeasureReset(_)
                | InstructionKind::NoiseChannel(_)
        )
    }

    /// Whether this kind produces measurement results.
    pub fn is_measurement(&self) -> bool {
        matches!(
            self,
            InstructionKind::Measure(_) | InstructionKind::MeasureReset(_)
        )
    }

    /// Whether this kind is a noise channel.
    pub fn is_noise(&self) -> bool {
        matches!(self, InstructionKind::NoiseChannel(_))
    }

    /// Qubits consumed per application (targets must come in multiples of this).
    fn arity(&self) -> u32 {
        match self {
            InstructionKind::Gate(gate) => gate.num_qubits(),
            InstructionKind::NoiseChannel(model) => model.num_qubits(),
            _ => 1,
        }
    }
}

/// A complete instruction with operands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    /// The kind of instruction.
    pub kind: InstructionKind,
    /// Qubits this instruction operates on.
    pub qubits: Vec<QubitId>,
    /// Measurement-record targets (detectors and observables).
    pub records: Vec<RecordOffset>,
    /// Coordinate arguments (qubit coordinates, detector anchors, shifts).
    pub args: Vec<f64>,
}

impl Instruction {
    fn on_qubits(kind: InstructionKind, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            kind,
            qubits: qubits.into_iter().collect(),
            records: vec![],
            args: vec![],
        }
    }

    /// Create a gate instruction.
    pub fn gate(gate: StandardGate, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self::on_qubits(InstructionKind::Gate(gate), qubits)
    }

    /// Create a reset instruction.
    pub fn reset(basis: Basis, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self::on_qubits(InstructionKind::Reset(basis), qubits)
    }

    /// Create a measurement instruction.
    pub fn measure(basis: Basis, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self::on_qubits(InstructionKind::Measure(basis), qubits)
    }

    /// Create a measure-and-reset instruction.
    pub fn measure_reset(basis: Basis, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self::on_qubits(InstructionKind::MeasureReset(basis), qubits)
    }

    /// Create a noise channel instruction.
    pub fn noise(model: NoiseModel, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self::on_qubits(InstructionKind::NoiseChannel(model), qubits)
    }

    /// Create a TICK.
    pub fn tick() -> Self {
        Self::on_qubits(InstructionKind::Tick, [])
    }

    /// Create a qubit coordinate annotation.
    pub fn qubit_coords(qubit: QubitId, coords: &[f64]) -> Self {
        Self {
            kind: InstructionKind::QubitCoords,
            qubits: vec![qubit],
            records: vec![],
            args: coords.to_vec(),
        }
    }

    /// Create a detector over the given records, anchored at `coords`.
    pub fn detector(records: impl IntoIterator<Item = RecordOffset>, coords: &[f64]) -> Self {
        Self {
            kind: InstructionKind::Detector,
            qubits: vec![],
            records: records.into_iter().collect(),
            args: coords.to_vec(),
        }
    }

    /// Create a coordinate shift.
    pub fn shift_coords(delta: &[f64]) -> Self {
        Self {
            kind: InstructionKind::ShiftCoords,
            qubits: vec![],
            records: vec![],
            args: delta.to_vec(),
        }
    }

    /// Create an observable inclusion.
    pub fn observable_include(index: u32, records: impl IntoIterator<Item = RecordOffset>) -> Self {
        Self {
            kind: InstructionKind::ObservableInclude(index),
            qubits: vec![],
            records: records.into_iter().collect(),
            args: vec![],
        }
    }

    /// Canonical instruction name.
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// The parenthesised arguments of the instruction in text form.
    ///
    /// Noise channels carry their probability, observables their index,
    /// everything else its coordinate arguments.
    pub fn paren_args(&self) -> Vec<f64> {
        match self.kind {
            InstructionKind::NoiseChannel(model) => vec![model.probability()],
            InstructionKind::ObservableInclude(index) => vec![f64::from(index)],
            _ => self.args.clone(),
        }
    }

    /// Number of measurement results this instruction appends to the record.
    pub fn num_measurements(&self) -> u64 {
        if self.kind.is_measurement() {
            self.qubits.len() as u64
        } else {
            0
        }
    }

    /// Whether `next` can be merged into this instruction.
    pub fn can_fuse_with(&self, next: &Instruction) -> bool {
        self.kind.is_fusable() && self.kind == next.kind && self.args == next.args
    }

    /// Check target counts, pair distinctness and probabilities.
    pub fn validate(&self) -> IrResult<()> {
        let arity = self.kind.arity();
        if arity > 1 {
            let got = self.qubits.len() as u32;
            if got % arity != 0 {
                return Err(IrError::QubitCountMismatch {
                    gate_name: self.name().to_string(),
                    arity,
                    got,
                });
            }
            for pair in self.qubits.chunks_exact(2) {
                if pair[0] == pair[1] {
                    return Err(IrError::DuplicateQubit {
                        qubit: pair[0],
                        gate_name: Some(self.name().to_string()),
                    });
                }
            }
        }
        if let InstructionKind::NoiseChannel(model) = &self.kind {
            model.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn qubits(ids: &[u32]) -> Vec<QubitId> {
        ids.iter().copied().map(QubitId).collect()
    }

    #[test]
    fn test_names() {
        assert_eq!(Instruction::reset(Basis::Z, qubits(&[0])).name(), "R");
        assert_eq!(Instruction::reset(Basis::X, qubits(&[0])).name(), "RX");
        assert_eq!(Instruction::measure(Basis::X, qubits(&[0])).name(), "MX");
        assert_eq!(
            Instruction::measure_reset(Basis::Z, qubits(&[0])).name(),
            "MR"
        );
        assert_eq!(Instruction::tick().name(), "TICK");
        assert_eq!(
            Instruction::observable_include(0, []).name(),
            "OBSERVABLE_INCLUDE"
        );
    }

    #[test]
    fn test_paren_args() {
        let noise = Instruction::noise(NoiseModel::BitFlip { p: 0.25 }, qubits(&[1]));
        assert_eq!(noise.paren_args(), vec![0.25]);
        let obs = Instruction::observable_include(3, []);
        assert_eq!(obs.paren_args(), vec![3.0]);
        let det = Instruction::detector([], &[2.0, 4.0, 0.0]);
        assert_eq!(det.paren_args(), vec![2.0, 4.0, 0.0]);
    }

    #[test]
    fn test_fusion_rules() {
        let h1 = Instruction::gate(StandardGate::H, qubits(&[0]));
        let h2 = Instruction::gate(StandardGate::H, qubits(&[1]));
        let cx = Instruction::gate(StandardGate::CX, qubits(&[0, 1]));
        assert!(h1.can_fuse_with(&h2));
        assert!(!h1.can_fuse_with(&cx));

        let x1 = Instruction::noise(NoiseModel::BitFlip { p: 0.1 }, qubits(&[0]));
        let x2 = Instruction::noise(NoiseModel::BitFlip { p: 0.2 }, qubits(&[1]));
        assert!(!x1.can_fuse_with(&x2));

        assert!(!Instruction::tick().can_fuse_with(&Instruction::tick()));
        let det = Instruction::detector([], &[0.0]);
        assert!(!det.can_fuse_with(&det.clone()));
    }

    #[test]
    fn test_validate_rejects_odd_pair_targets() {
        let cx = Instruction::gate(StandardGate::CX, qubits(&[0, 1, 2]));
        assert!(matches!(
            cx.validate(),
            Err(IrError::QubitCountMismatch { arity: 2, got: 3, .. })
        ));
        let dep = Instruction::noise(NoiseModel::Depolarize2 { p: 0.1 }, qubits(&[4]));
        assert!(dep.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_self_pair() {
        let cx = Instruction::gate(StandardGate::CX, qubits(&[0, 1, 2, 2]));
        assert!(matches!(
            cx.validate(),
            Err(IrError::DuplicateQubit { qubit: QubitId(2), .. })
        ));
    }

    #[test]
    fn test_measurement_count() {
        assert_eq!(
            Instruction::measure(Basis::Z, qubits(&[0, 1, 2])).num_measurements(),
            3
        );
        assert_eq!(
            Instruction::reset(Basis::Z, qubits(&[0, 1, 2])).num_measurements(),
            0
        );
    }
}
