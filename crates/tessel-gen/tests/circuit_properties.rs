//! Structural properties of generated memory experiments.

use tessel_gen::{CircuitGenParameters, CodeTask, GenError, generate_circuit, generate_from_task};
use tessel_ir::{Basis, Circuit, Instruction, InstructionKind, Operation};
use tessel_stim::emit;

fn noisy(distance: u32, rounds: u32) -> CircuitGenParameters {
    CircuitGenParameters::new(distance, rounds).with_noise(0.001, 0.002, 0.003, 0.004)
}

fn instructions(circuit: &Circuit) -> Vec<&Instruction> {
    circuit
        .operations()
        .iter()
        .filter_map(|op| match op {
            Operation::Instruction(inst) => Some(inst),
            Operation::Repeat { .. } => None,
        })
        .collect()
}

fn repeat_of(circuit: &Circuit) -> Option<(u64, &Circuit)> {
    circuit.operations().iter().find_map(|op| match op {
        Operation::Repeat { count, body } => Some((*count, body)),
        Operation::Instruction(_) => None,
    })
}

#[test]
fn test_deterministic_output() {
    for task in CodeTask::all() {
        let params = noisy(3, 4);
        let a = generate_from_task(task, &params).unwrap();
        let b = generate_from_task(task, &params).unwrap();
        assert_eq!(a, b, "{task}");
        assert_eq!(emit(&a), emit(&b), "{task}");
    }
}

#[test]
fn test_zero_noise_has_no_channels() {
    for task in CodeTask::all() {
        for exclude in [false, true] {
            let params = CircuitGenParameters::new(3, 3).with_exclude_other_basis_detectors(exclude);
            let circuit = generate_from_task(task, &params).unwrap();
            assert_eq!(
                circuit.count_instructions(|inst| inst.kind.is_noise()),
                0,
                "{task}"
            );
        }
    }
}

#[test]
fn test_noise_present_when_configured() {
    let circuit = generate_circuit("surface_code:rotated_memory_x", &noisy(3, 3)).unwrap();
    assert!(circuit.count_instructions(|inst| inst.kind.is_noise()) > 0);
}

#[test]
fn test_records_stay_in_range() {
    for task in CodeTask::all() {
        for rounds in [1, 2, 5] {
            let circuit = generate_from_task(task, &noisy(3, rounds)).unwrap();
            assert!(circuit.validate_records().is_ok(), "{task} rounds={rounds}");
        }
    }
}

#[test]
fn test_rotated_distance_two_scenario() {
    let params = CircuitGenParameters::new(2, 2);
    for (task, chosen, other) in [("surface_code:rotated_memory_z", 1, 2), ("surface_code:rotated_memory_x", 2, 1)] {
        let circuit = generate_circuit(task, &params).unwrap();
        let top = instructions(&circuit);

        let coords = top
            .iter()
            .filter(|inst| inst.kind == InstructionKind::QubitCoords)
            .count();
        assert_eq!(coords, 4 + chosen + other, "{task}");

        // Rounds beyond the first appear once each, unrolled here.
        assert!(repeat_of(&circuit).is_none());
        let rounds = top
            .iter()
            .filter(|inst| inst.kind == InstructionKind::MeasureReset(Basis::Z))
            .count();
        assert_eq!(rounds, 2);

        let data_measure = top
            .iter()
            .position(|inst| matches!(inst.kind, InstructionKind::Measure(_)))
            .unwrap();
        let first_mr = top
            .iter()
            .position(|inst| inst.kind == InstructionKind::MeasureReset(Basis::Z))
            .unwrap();
        let detectors_between = |lo: usize, hi: usize| {
            top[lo..hi]
                .iter()
                .filter(|inst| inst.kind == InstructionKind::Detector)
                .collect::<Vec<_>>()
        };

        let head = detectors_between(first_mr, first_mr + 1 + chosen);
        assert_eq!(head.len(), chosen, "{task}");
        assert!(head.iter().all(|d| d.records.len() == 1));

        let steady = detectors_between(first_mr + 1 + chosen, data_measure);
        assert_eq!(steady.len(), chosen + other, "{task}");
        assert!(steady.iter().all(|d| d.records.len() == 2));

        let tail = detectors_between(data_measure, top.len());
        assert_eq!(tail.len(), chosen, "{task}");

        let observable = top.last().unwrap();
        assert_eq!(observable.kind, InstructionKind::ObservableInclude(0));
        assert_eq!(observable.records.len(), 2);
    }
}

#[test]
fn test_body_repeats_rounds_minus_one() {
    let circuit = generate_circuit("surface_code:unrotated_memory_x", &noisy(3, 7)).unwrap();
    let (count, body) = repeat_of(&circuit).unwrap();
    assert_eq!(count, 6);
    assert_eq!(
        body.count_instructions(|inst| inst.kind == InstructionKind::ShiftCoords),
        1
    );
    // 13 data + 12 measurement qubits on a distance 3 unrotated patch
    assert_eq!(circuit.num_qubits(), 25);
    assert_eq!(circuit.num_measurements(), 12 * 7 + 13);
}

#[test]
fn test_exclude_drops_opposite_basis_body_detectors() {
    let full = generate_circuit("surface_code:rotated_memory_z", &noisy(3, 4)).unwrap();
    let reduced = generate_circuit(
        "surface_code:rotated_memory_z",
        &noisy(3, 4).with_exclude_other_basis_detectors(true),
    )
    .unwrap();
    // head 4 + body 3 * 8 + tail 4, against head 4 + body 3 * 4 + tail 4
    assert_eq!(full.num_detectors(), 32);
    assert_eq!(reduced.num_detectors(), 20);
    assert_eq!(full.num_measurements(), reduced.num_measurements());
}

#[test]
fn test_rectangular_rotated_patch() {
    let params = CircuitGenParameters::new(3, 2).with_x_distance(5);
    let circuit = generate_circuit("surface_code:rotated_memory_z", &params).unwrap();
    // 5 x 3 data qubits and 14 stabilizers
    assert_eq!(
        circuit.count_instructions(|inst| inst.kind == InstructionKind::QubitCoords),
        29
    );
    assert_eq!(circuit.num_measurements(), 14 * 2 + 15);
    let observable = circuit.flatten().pop().unwrap();
    assert_eq!(observable.records.len(), 3);

    let x_memory = generate_circuit("surface_code:rotated_memory_x", &params).unwrap();
    assert_eq!(x_memory.flatten().pop().unwrap().records.len(), 5);
}

#[test]
fn test_configuration_errors() {
    assert!(matches!(
        generate_circuit("surface_code:rotated_memory_x", &CircuitGenParameters::new(3, 0)),
        Err(GenError::InvalidRounds(0))
    ));
    assert!(matches!(
        generate_circuit("toric_code:unrotated_memory_z", &CircuitGenParameters::new(1, 3)),
        Err(GenError::InvalidDistance(1))
    ));
    assert!(matches!(
        generate_circuit("toric_code:rotated_memory_z", &CircuitGenParameters::new(3, 3)),
        Err(GenError::UnsupportedTask { .. })
    ));
    let err = generate_circuit("hex_code:rotated_memory_z", &CircuitGenParameters::new(3, 3))
        .unwrap_err();
    assert_eq!(err.to_string(), "Code name hex_code not recognised");
}
