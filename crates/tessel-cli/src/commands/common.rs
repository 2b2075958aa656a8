//! Shared helpers for CLI commands.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tessel_gen::{CircuitGenParameters, CodeTask, generate_from_task};
use tessel_ir::Circuit;
use tracing::info;

/// Generate the program for already-resolved settings.
pub fn build_circuit(task: CodeTask, params: &CircuitGenParameters) -> Result<Circuit> {
    info!(
        code_task = %task,
        distance = params.distance,
        rounds = params.rounds,
        "generating circuit"
    );
    generate_from_task(task, params).with_context(|| format!("Failed to generate {task}"))
}

/// Write text to a file, creating missing parent directories.
pub fn write_text(path: &Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(path, text).with_context(|| format!("Failed to write file: {}", path.display()))
}
