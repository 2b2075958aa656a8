//! High-level program builder API.

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul};

use crate::basis::Basis;
use crate::error::{IrError, IrResult};
use crate::gate::StandardGate;
use crate::instruction::{Instruction, InstructionKind};
use crate::noise::NoiseModel;
use crate::qubit::{QubitId, RecordOffset};

/// One entry of a program: a single instruction or a repeated sub-program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Operation {
    /// A plain instruction.
    Instruction(Instruction),
    /// A block executed `count` times in sequence.
    Repeat {
        /// Number of iterations (always at least 2 when built by [`Circuit::repeated`]).
        count: u64,
        /// The repeated program.
        body: Circuit,
    },
}

/// A stabilizer program.
///
/// Instructions are kept in emission order. Appending an instruction that
/// matches the previous one (same kind and arguments) extends the previous
/// target list instead of adding a new entry, so the program is always in
/// its canonical fused form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    operations: Vec<Operation>,
}

impl Circuit {
    /// Create a new empty program.
    pub fn new() -> Self {
        Self::default()
    }

    /// The top-level operations.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Check if the program has no operations.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Append an instruction after validating it.
    ///
    /// Fusable instructions with no targets are dropped.
    pub fn push(&mut self, instruction: Instruction) -> IrResult<&mut Self> {
        instruction.validate()?;
        self.push_validated(instruction);
        Ok(self)
    }

    fn push_validated(&mut self, instruction: Instruction) {
        if instruction.kind.is_fusable() && instruction.qubits.is_empty() {
            return;
        }
        if let Some(Operation::Instruction(last)) = self.operations.last_mut() {
            if last.can_fuse_with(&instruction) {
                last.qubits.extend(instruction.qubits);
                return;
            }
        }
        self.operations.push(Operation::Instruction(instruction));
    }

    // =========================================================================
    // Gates, resets and measurements
    // =========================================================================

    /// Apply a gate to a flat target list.
    pub fn gate(
        &mut self,
        gate: StandardGate,
        qubits: impl IntoIterator<Item = QubitId>,
    ) -> IrResult<&mut Self> {
        self.push(Instruction::gate(gate, qubits))
    }

    /// Apply Hadamard gates.
    pub fn h(&mut self, qubits: impl IntoIterator<Item = QubitId>) -> IrResult<&mut Self> {
        self.gate(StandardGate::H, qubits)
    }

    /// Apply CNOT gates to consecutive (control, target) pairs.
    pub fn cx(&mut self, qubits: impl IntoIterator<Item = QubitId>) -> IrResult<&mut Self> {
        self.gate(StandardGate::CX, qubits)
    }

    /// Reset qubits in a basis.
    pub fn reset(
        &mut self,
        qubits: impl IntoIterator<Item = QubitId>,
        basis: Basis,
    ) -> IrResult<&mut Self> {
        self.push(Instruction::reset(basis, qubits))
    }

    /// Measure qubits in a basis.
    pub fn measure(
        &mut self,
        qubits: impl IntoIterator<Item = QubitId>,
        basis: Basis,
    ) -> IrResult<&mut Self> {
        self.push(Instruction::measure(basis, qubits))
    }

    /// Measure and reset qubits in a basis.
    pub fn measure_reset(
        &mut self,
        qubits: impl IntoIterator<Item = QubitId>,
        basis: Basis,
    ) -> IrResult<&mut Self> {
        self.push(Instruction::measure_reset(basis, qubits))
    }

    /// Apply a noise channel.
    pub fn noise(
        &mut self,
        model: NoiseModel,
        qubits: impl IntoIterator<Item = QubitId>,
    ) -> IrResult<&mut Self> {
        self.push(Instruction::noise(model, qubits))
    }

    // =========================================================================
    // Annotations
    // =========================================================================

    /// Insert a layer separator.
    pub fn tick(&mut self) -> IrResult<&mut Self> {
        self.push(Instruction::tick())
    }

    /// Attach coordinates to a qubit.
    pub fn qubit_coords(&mut self, qubit: QubitId, coords: &[f64]) -> IrResult<&mut Self> {
        self.push(Instruction::qubit_coords(qubit, coords))
    }

    /// Declare a detector.
    pub fn detector(
        &mut self,
        records: impl IntoIterator<Item = RecordOffset>,
        coords: &[f64],
    ) -> IrResult<&mut Self> {
        self.push(Instruction::detector(records, coords))
    }

    /// Shift the coordinates of subsequent annotations.
    pub fn shift_coords(&mut self, delta: &[f64]) -> IrResult<&mut Self> {
        self.push(Instruction::shift_coords(delta))
    }

    /// Add records to a logical observable.
    pub fn observable_include(
        &mut self,
        index: u32,
        records: impl IntoIterator<Item = RecordOffset>,
    ) -> IrResult<&mut Self> {
        self.push(Instruction::observable_include(index, records))
    }

    // =========================================================================
    // Composition
    // =========================================================================

    /// Append another program, fusing across the boundary.
    pub fn append(&mut self, other: &Circuit) -> &mut Self {
        for op in &other.operations {
            match op {
                Operation::Instruction(inst) => self.push_validated(inst.clone()),
                Operation::Repeat { .. } => self.operations.push(op.clone()),
            }
        }
        self
    }

    /// Repeat this program `count` times.
    ///
    /// Zero repetitions is the empty program, one is a plain copy, and more
    /// wrap the program in a single repeat block.
    pub fn repeated(&self, count: u64) -> Circuit {
        match count {
            0 => Circuit::new(),
            1 => self.clone(),
            _ => Circuit {
                operations: vec![Operation::Repeat {
                    count,
                    body: self.clone(),
                }],
            },
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Number of qubits touched: one more than the largest qubit index.
    pub fn num_qubits(&self) -> u32 {
        self.max_qubit().map_or(0, |q| q.0 + 1)
    }

    fn max_qubit(&self) -> Option<QubitId> {
        self.operations
            .iter()
            .filter_map(|op| match op {
                Operation::Instruction(inst) => inst.qubits.iter().max().copied(),
                Operation::Repeat { body, .. } => body.max_qubit(),
            })
            .max()
    }

    /// Total number of measurement results produced, repeats expanded.
    pub fn num_measurements(&self) -> u64 {
        self.count_weighted(&|inst| inst.num_measurements())
    }

    /// Total number of detectors declared, repeats expanded.
    pub fn num_detectors(&self) -> u64 {
        self.count_instructions(|inst| inst.kind == InstructionKind::Detector)
    }

    /// Number of logical observables: one more than the largest index used.
    pub fn num_observables(&self) -> u32 {
        self.observable_max().map_or(0, |i| i + 1)
    }

    fn observable_max(&self) -> Option<u32> {
        self.operations
            .iter()
            .filter_map(|op| match op {
                Operation::Instruction(Instruction {
                    kind: InstructionKind::ObservableInclude(index),
                    ..
                }) => Some(*index),
                Operation::Instruction(_) => None,
                Operation::Repeat { body, .. } => body.observable_max(),
            })
            .max()
    }

    /// Count instructions matching a predicate, repeats expanded.
    pub fn count_instructions(&self, predicate: impl Fn(&Instruction) -> bool) -> u64 {
        self.count_weighted(&|inst| u64::from(predicate(inst)))
    }

    fn count_weighted(&self, weight: &dyn Fn(&Instruction) -> u64) -> u64 {
        self.operations
            .iter()
            .map(|op| match op {
                Operation::Instruction(inst) => weight(inst),
                Operation::Repeat { count, body } => count * body.count_weighted(weight),
            })
            .sum()
    }

    /// Expand every repeat block, in execution order.
    pub fn flatten(&self) -> Vec<Instruction> {
        let mut out = Vec::new();
        self.flatten_into(&mut out);
        out
    }

    fn flatten_into(&self, out: &mut Vec<Instruction>) {
        for op in &self.operations {
            match op {
                Operation::Instruction(inst) => out.push(inst.clone()),
                Operation::Repeat { count, body } => {
                    for _ in 0..*count {
                        body.flatten_into(out);
                    }
                }
            }
        }
    }

    /// Check that no detector or observable reaches before the start of the
    /// measurement record.
    pub fn validate_records(&self) -> IrResult<()> {
        self.validate_records_from(0).map(|_| ())
    }

    /// Returns the number of results available after this program runs.
    ///
    /// A repeat body sees the fewest results on its first iteration, so
    /// checking that iteration covers all of them.
    fn validate_records_from(&self, mut available: u64) -> IrResult<u64> {
        for op in &self.operations {
            match op {
                Operation::Instruction(inst) => {
                    for rec in &inst.records {
                        if u64::from(rec.get().unsigned_abs()) > available {
                            return Err(IrError::RecordOutOfRange {
                                offset: rec.get(),
                                available,
                            });
                        }
                    }
                    available += inst.num_measurements();
                }
                Operation::Repeat { count, body } => {
                    let after_first = body.validate_records_from(available)?;
                    available += (after_first - available) * count;
                }
            }
        }
        Ok(available)
    }
}

impl Add for Circuit {
    type Output = Circuit;

    fn add(mut self, rhs: Circuit) -> Circuit {
        self.append(&rhs);
        self
    }
}

impl Add<&Circuit> for Circuit {
    type Output = Circuit;

    fn add(mut self, rhs: &Circuit) -> Circuit {
        self.append(rhs);
        self
    }
}

impl AddAssign<&Circuit> for Circuit {
    fn add_assign(&mut self, rhs: &Circuit) {
        self.append(rhs);
    }
}

impl AddAssign for Circuit {
    fn add_assign(&mut self, rhs: Circuit) {
        self.append(&rhs);
    }
}

impl Mul<u64> for &Circuit {
    type Output = Circuit;

    fn mul(self, count: u64) -> Circuit {
        self.repeated(count)
    }
}

impl Mul<u64> for Circuit {
    type Output = Circuit;

    fn mul(self, count: u64) -> Circuit {
        self.repeated(count)
    }
}
