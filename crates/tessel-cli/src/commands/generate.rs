//! Generate command implementation.

use std::path::Path;

use anyhow::Result;
use console::style;
use tessel_stim::emit;

use super::common::{build_circuit, write_text};
use crate::config::GenerationArgs;

/// Execute the generate command.
pub fn execute(args: &GenerationArgs, output: Option<&Path>) -> Result<()> {
    let (task, params) = args.resolve()?;
    let circuit = build_circuit(task, &params)?;
    let text = emit(&circuit);

    match output {
        Some(path) => {
            write_text(path, &text)?;
            eprintln!(
                "{} Generated {} (d={}, rounds={}): {} measurements, {} detectors",
                style("✓").green().bold(),
                style(task).cyan(),
                params.distance,
                params.rounds,
                circuit.num_measurements(),
                circuit.num_detectors()
            );
            eprintln!("  Output: {}", style(path.display()).green());
        }
        None => print!("{text}"),
    }

    Ok(())
}
