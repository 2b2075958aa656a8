//! Noise placement around the ideal operations of a memory experiment.
//!
//! Each helper appends the ideal operation together with the noise channels
//! configured for it. A channel is only appended when its probability is
//! strictly positive, so a noiseless configuration yields a program with no
//! noise instructions at all.

use tessel_ir::{Basis, Circuit, NoiseModel, QubitId, StandardGate};

use crate::error::GenResult;
use crate::params::CircuitGenParameters;

/// The flip channel that corrupts a state prepared or measured in `basis`,
/// or `None` when `p` is not positive.
pub fn anti_basis_error(basis: Basis, p: f64) -> Option<NoiseModel> {
    (p > 0.0).then(|| NoiseModel::flip(basis, p))
}

/// Appends operations with the noise configured in [`CircuitGenParameters`].
#[derive(Debug, Clone, Copy)]
pub struct NoiseInjector<'a> {
    params: &'a CircuitGenParameters,
}

impl<'a> NoiseInjector<'a> {
    pub fn new(params: &'a CircuitGenParameters) -> Self {
        Self { params }
    }

    fn anti_basis(
        circuit: &mut Circuit,
        targets: &[QubitId],
        p: f64,
        basis: Basis,
    ) -> GenResult<()> {
        if let Some(model) = anti_basis_error(basis, p) {
            circuit.noise(model, targets.iter().copied())?;
        }
        Ok(())
    }

    /// `TICK`, then start-of-round depolarization of the data qubits.
    pub fn begin_round_tick(&self, circuit: &mut Circuit, data: &[QubitId]) -> GenResult<()> {
        circuit.tick()?;
        let p = self.params.before_round_data_depolarization;
        if p > 0.0 {
            circuit.noise(NoiseModel::Depolarize1 { p }, data.iter().copied())?;
        }
        Ok(())
    }

    /// Single-qubit Clifford followed by `DEPOLARIZE1`.
    pub fn unitary_1(
        &self,
        circuit: &mut Circuit,
        gate: StandardGate,
        targets: &[QubitId],
    ) -> GenResult<()> {
        circuit.gate(gate, targets.iter().copied())?;
        let p = self.params.after_clifford_depolarization;
        if p > 0.0 {
            circuit.noise(NoiseModel::Depolarize1 { p }, targets.iter().copied())?;
        }
        Ok(())
    }

    /// Two-qubit Clifford followed by `DEPOLARIZE2` on the same pairs.
    pub fn unitary_2(
        &self,
        circuit: &mut Circuit,
        gate: StandardGate,
        targets: &[QubitId],
    ) -> GenResult<()> {
        circuit.gate(gate, targets.iter().copied())?;
        let p = self.params.after_clifford_depolarization;
        if p > 0.0 {
            circuit.noise(NoiseModel::Depolarize2 { p }, targets.iter().copied())?;
        }
        Ok(())
    }

    /// Reset, then the after-reset flip.
    pub fn reset(&self, circuit: &mut Circuit, targets: &[QubitId], basis: Basis) -> GenResult<()> {
        circuit.reset(targets.iter().copied(), basis)?;
        Self::anti_basis(
            circuit,
            targets,
            self.params.after_reset_flip_probability,
            basis,
        )
    }

    /// The before-measure flip, then measure.
    pub fn measure(
        &self,
        circuit: &mut Circuit,
        targets: &[QubitId],
        basis: Basis,
    ) -> GenResult<()> {
        Self::anti_basis(
            circuit,
            targets,
            self.params.before_measure_flip_probability,
            basis,
        )?;
        circuit.measure(targets.iter().copied(), basis)?;
        Ok(())
    }

    /// The before-measure flip, measure-and-reset, then the after-reset flip.
    pub fn measure_reset(
        &self,
        circuit: &mut Circuit,
        targets: &[QubitId],
        basis: Basis,
    ) -> GenResult<()> {
        Self::anti_basis(
            circuit,
            targets,
            self.params.before_measure_flip_probability,
            basis,
        )?;
        circuit.measure_reset(targets.iter().copied(), basis)?;
        Self::anti_basis(
            circuit,
            targets,
            self.params.after_reset_flip_probability,
            basis,
        )
    }
}
