//! Analyze command implementation.
//!
//! `tessel analyze -t <code_task> -d <distance> [noise flags] [--format json] [--dem-output model.dem]`

use std::path::Path;

use anyhow::{Context, Result};
use console::style;
use serde::Serialize;
use tessel_dem::{DetectorErrorModel, ErrorMechanism, shortest_graphlike_error};
use tessel_gen::{CircuitGenParameters, CodeTask};
use tessel_ir::Basis;

use super::common::{build_circuit, write_text};
use crate::config::GenerationArgs;

/// Report output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

/// Mechanism counts by number of detectors flipped.
#[derive(Debug, Default, Serialize)]
pub struct MechanismCounts {
    pub total: usize,
    pub undetectable: usize,
    pub boundary: usize,
    pub edge: usize,
    pub hyperedge: usize,
}

impl MechanismCounts {
    fn of(dem: &DetectorErrorModel) -> Self {
        let mut counts = Self {
            total: dem.num_mechanisms(),
            ..Default::default()
        };
        for m in &dem.mechanisms {
            if m.is_hyperedge() {
                counts.hyperedge += 1;
            } else if m.is_edge() {
                counts.edge += 1;
            } else if m.is_boundary() {
                counts.boundary += 1;
            } else {
                counts.undetectable += 1;
            }
        }
        counts
    }
}

/// Everything `analyze` reports about one generated program.
#[derive(Debug, Serialize)]
pub struct AnalysisReport {
    pub code_task: String,
    pub distance: u32,
    pub x_distance: Option<u32>,
    pub rounds: u32,
    /// Circuit distance the layout is built for.
    pub expected_distance: u32,
    pub num_qubits: u32,
    pub num_measurements: u64,
    pub num_detectors: u64,
    pub num_observables: u32,
    pub mechanisms: MechanismCounts,
    pub graphlike_distance: Option<usize>,
    pub shortest_error: Vec<ErrorMechanism>,
}

/// Execute the analyze command.
pub fn execute(
    args: &GenerationArgs,
    format: OutputFormat,
    dem_output: Option<&Path>,
) -> Result<()> {
    let (task, params) = args.resolve()?;
    let circuit = build_circuit(task, &params)?;
    let dem = DetectorErrorModel::from_circuit(&circuit)
        .with_context(|| format!("Failed to extract error model of {task}"))?;

    if let Some(path) = dem_output {
        write_text(path, &dem.to_string())?;
    }

    let shortest = shortest_graphlike_error(&dem);
    let report = AnalysisReport {
        code_task: task.to_string(),
        distance: params.distance,
        x_distance: params.x_distance,
        rounds: params.rounds,
        expected_distance: expected_distance(task, &params),
        num_qubits: circuit.num_qubits(),
        num_measurements: circuit.num_measurements(),
        num_detectors: circuit.num_detectors(),
        num_observables: circuit.num_observables(),
        mechanisms: MechanismCounts::of(&dem),
        graphlike_distance: shortest.as_ref().map(Vec::len),
        shortest_error: shortest
            .unwrap_or_default()
            .into_iter()
            .filter_map(|i| dem.mechanisms.get(i).cloned())
            .collect(),
    };

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report)
                .context("Failed to serialize analysis report")?;
            println!("{json}");
        }
        OutputFormat::Table => print_report(&report),
    }

    Ok(())
}

/// A rectangular rotated patch protects its Z memory with its row count.
fn expected_distance(task: CodeTask, params: &CircuitGenParameters) -> u32 {
    if task.task.is_rotated() && task.task.basis() == Basis::Z {
        params.effective_x_distance()
    } else {
        params.distance
    }
}

fn print_report(report: &AnalysisReport) {
    println!(
        "\n{} {} (d={}, rounds={})",
        style("Analysis").bold().underlined(),
        style(&report.code_task).cyan(),
        report.distance,
        report.rounds
    );
    println!("  Qubit indices:  {}", report.num_qubits);
    println!("  Measurements:   {}", report.num_measurements);
    println!("  Detectors:      {}", report.num_detectors);
    println!("  Observables:    {}", report.num_observables);

    let m = &report.mechanisms;
    println!(
        "  Mechanisms:     {} ({} boundary, {} edge, {} hyperedge, {} undetectable)",
        m.total, m.boundary, m.edge, m.hyperedge, m.undetectable
    );

    if m.total == 0 {
        println!(
            "\n{} No noise configured, so there is nothing to analyse",
            style("!").yellow().bold()
        );
        return;
    }

    match report.graphlike_distance {
        Some(weight) => {
            let mark = if weight == report.expected_distance as usize {
                style("✓").green().bold()
            } else {
                style("✗").red().bold()
            };
            println!(
                "\n{} Shortest graph-like logical error: {} mechanisms",
                mark,
                style(weight).yellow()
            );
            for mechanism in &report.shortest_error {
                let detectors: Vec<String> =
                    mechanism.detectors.iter().map(|d| format!("D{d}")).collect();
                let observables: Vec<String> =
                    mechanism.observables.iter().map(|l| format!("L{l}")).collect();
                println!(
                    "    {} {}",
                    detectors.join(" "),
                    style(observables.join(" ")).magenta()
                );
            }
        }
        None => println!(
            "\n{} No graph-like logical error found",
            style("✗").red().bold()
        ),
    }
}
