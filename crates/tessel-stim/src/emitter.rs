//! Stim emitter for serializing programs.

use tessel_ir::{Circuit, Instruction, Operation};

/// Emit a program as stim circuit text.
///
/// Every line, including the last, is newline-terminated.
///
/// Arguments use Rust's shortest round-trip decimal form and never an
/// exponent, so `1e-5` is written `0.00001`. Text for probabilities below
/// `1e-4` can therefore differ from stim's own rendering while still parsing
/// back to the same value.
pub fn emit(circuit: &Circuit) -> String {
    let mut emitter = Emitter::new();
    emitter.emit_circuit(circuit);
    emitter.output
}

/// Stim emitter.
struct Emitter {
    output: String,
    indent: usize,
}

impl Emitter {
    fn new() -> Self {
        Self {
            output: String::new(),
            indent: 0,
        }
    }

    fn emit_circuit(&mut self, circuit: &Circuit) {
        for op in circuit.operations() {
            match op {
                Operation::Instruction(instruction) => self.emit_instruction(instruction),
                Operation::Repeat { count, body } => {
                    self.writeln(&format!("REPEAT {count} {{"));
                    self.indent += 1;
                    self.emit_circuit(body);
                    self.indent -= 1;
                    self.writeln("}");
                }
            }
        }
    }

    fn emit_instruction(&mut self, instruction: &Instruction) {
        let mut line = String::from(instruction.name());

        let args = instruction.paren_args();
        if !args.is_empty() {
            line.push('(');
            line.push_str(&emit_args(&args));
            line.push(')');
        }

        for qubit in &instruction.qubits {
            line.push(' ');
            line.push_str(&qubit.0.to_string());
        }
        for record in &instruction.records {
            line.push(' ');
            line.push_str(&record.to_string());
        }

        self.writeln(&line);
    }

    fn writeln(&mut self, line: &str) {
        let indent = "    ".repeat(self.indent);
        self.output.push_str(&indent);
        self.output.push_str(line);
        self.output.push('\n');
    }
}

/// Shortest decimal form that reads back to the same value (`1`, `0.001`).
fn emit_args(args: &[f64]) -> String {
    args.iter()
        .map(|v| format!("{v}"))
        .collect::<Vec<_>>()
        .join(", ")
}
