//! Top-level entry points.

use tessel_ir::Circuit;
use tracing::{debug, warn};

use crate::assembler::finish_surface_code_circuit;
use crate::error::GenResult;
use crate::lattice::Layout;
use crate::params::CircuitGenParameters;
use crate::task::{CodeFamily, CodeTask};

/// Generate the memory experiment named by `code_task`.
///
/// Available code tasks:
///
/// - `surface_code:rotated_memory_x`
/// - `surface_code:rotated_memory_z`
/// - `surface_code:unrotated_memory_x`
/// - `surface_code:unrotated_memory_z`
/// - `toric_code:unrotated_memory_x`
/// - `toric_code:unrotated_memory_z`
pub fn generate_circuit(code_task: &str, params: &CircuitGenParameters) -> GenResult<Circuit> {
    let task: CodeTask = code_task.parse()?;
    generate_from_task(task, params)
}

/// Generate the memory experiment for an already-parsed code task.
pub fn generate_from_task(task: CodeTask, params: &CircuitGenParameters) -> GenResult<Circuit> {
    params.validate()?;
    debug!(
        code_task = %task,
        distance = params.distance,
        rounds = params.rounds,
        "generating circuit"
    );

    let layout = if task.task.is_rotated() {
        Layout::rotated(params.effective_x_distance(), params.distance)?
    } else {
        if params.x_distance.is_some() {
            warn!(code_task = %task, "x_distance only applies to rotated codes; ignoring it");
        }
        Layout::unrotated(params.distance, task.family == CodeFamily::ToricCode)?
    };

    finish_surface_code_circuit(&layout, params, task.task.basis())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GenError;

    #[test]
    fn test_dispatch_errors() {
        let params = CircuitGenParameters::new(3, 3);
        assert!(matches!(
            generate_circuit("surface_code:memory_w", &params),
            Err(GenError::UnknownTask(_))
        ));
        assert!(matches!(
            generate_circuit("steane:rotated_memory_x", &params),
            Err(GenError::UnknownCodeFamily(_))
        ));
    }

    #[test]
    fn test_parameters_validated_first() {
        let params = CircuitGenParameters::new(3, 3).with_noise(2.0, 0.0, 0.0, 0.0);
        assert!(matches!(
            generate_circuit("surface_code:rotated_memory_x", &params),
            Err(GenError::InvalidProbability { .. })
        ));
    }

    #[test]
    fn test_x_distance_ignored_for_unrotated() {
        let plain = CircuitGenParameters::new(3, 2);
        let with_x = plain.clone().with_x_distance(5);
        let a = generate_circuit("surface_code:unrotated_memory_z", &plain).unwrap();
        let b = generate_circuit("surface_code:unrotated_memory_z", &with_x).unwrap();
        assert_eq!(a, b);
    }
}
