//! Generation settings.
//!
//! Every setting can come from a command-line flag, a `TESSEL_*`
//! environment variable or a YAML config file, in that order of
//! precedence, before falling back to the defaults below.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use serde::{Deserialize, Serialize};
use tessel_gen::{CircuitGenParameters, CodeTask};

pub const DEFAULT_CODE_TASK: &str = "surface_code:rotated_memory_z";
pub const DEFAULT_DISTANCE: u32 = 3;
pub const DEFAULT_ROUNDS: u32 = 3;

/// Generation settings, each of which may be left unset.
///
/// This is also the layout of the YAML config file:
///
/// ```yaml
/// code_task: surface_code:rotated_memory_x
/// distance: 5
/// rounds: 10
/// after_clifford_depolarization: 0.001
/// exclude_other_basis_detectors: true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenConfig {
    pub code_task: Option<String>,
    pub distance: Option<u32>,
    pub x_distance: Option<u32>,
    pub rounds: Option<u32>,
    pub after_clifford_depolarization: Option<f64>,
    pub before_round_data_depolarization: Option<f64>,
    pub before_measure_flip_probability: Option<f64>,
    pub after_reset_flip_probability: Option<f64>,
    pub exclude_other_basis_detectors: Option<bool>,
}

impl GenConfig {
    /// Read a YAML config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        serde_yaml_ng::from_str(&text)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Settings present in `self` win; the rest are taken from `base`.
    pub fn or(self, base: GenConfig) -> GenConfig {
        GenConfig {
            code_task: self.code_task.or(base.code_task),
            distance: self.distance.or(base.distance),
            x_distance: self.x_distance.or(base.x_distance),
            rounds: self.rounds.or(base.rounds),
            after_clifford_depolarization: self
                .after_clifford_depolarization
                .or(base.after_clifford_depolarization),
            before_round_data_depolarization: self
                .before_round_data_depolarization
                .or(base.before_round_data_depolarization),
            before_measure_flip_probability: self
                .before_measure_flip_probability
                .or(base.before_measure_flip_probability),
            after_reset_flip_probability: self
                .after_reset_flip_probability
                .or(base.after_reset_flip_probability),
            exclude_other_basis_detectors: self
                .exclude_other_basis_detectors
                .or(base.exclude_other_basis_detectors),
        }
    }

    /// Fill in defaults and check the result.
    pub fn resolve(self) -> Result<(CodeTask, CircuitGenParameters)> {
        let code_task = self.code_task.as_deref().unwrap_or(DEFAULT_CODE_TASK);
        let task: CodeTask = code_task
            .parse()
            .with_context(|| format!("Invalid code task '{code_task}'"))?;

        let mut params = CircuitGenParameters::new(
            self.distance.unwrap_or(DEFAULT_DISTANCE),
            self.rounds.unwrap_or(DEFAULT_ROUNDS),
        )
        .with_noise(
            self.after_clifford_depolarization.unwrap_or(0.0),
            self.before_round_data_depolarization.unwrap_or(0.0),
            self.before_measure_flip_probability.unwrap_or(0.0),
            self.after_reset_flip_probability.unwrap_or(0.0),
        )
        .with_exclude_other_basis_detectors(self.exclude_other_basis_detectors.unwrap_or(false));
        params.x_distance = self.x_distance;
        params.validate().context("Invalid generation parameters")?;

        Ok((task, params))
    }
}

/// Generation flags shared by `generate` and `analyze`.
#[derive(Debug, Clone, Args)]
pub struct GenerationArgs {
    /// Code family and task, e.g. surface_code:rotated_memory_x
    #[arg(short = 't', long, env = "TESSEL_CODE_TASK")]
    pub code_task: Option<String>,

    /// Code distance
    #[arg(short, long, env = "TESSEL_DISTANCE")]
    pub distance: Option<u32>,

    /// Data rows of a rectangular rotated patch
    #[arg(long, env = "TESSEL_X_DISTANCE")]
    pub x_distance: Option<u32>,

    /// Number of syndrome rounds
    #[arg(short, long, env = "TESSEL_ROUNDS")]
    pub rounds: Option<u32>,

    /// DEPOLARIZE1/DEPOLARIZE2 after every Clifford gate
    #[arg(long, env = "TESSEL_AFTER_CLIFFORD_DEPOLARIZATION")]
    pub after_clifford_depolarization: Option<f64>,

    /// DEPOLARIZE1 on the data qubits at the start of each round
    #[arg(long, env = "TESSEL_BEFORE_ROUND_DATA_DEPOLARIZATION")]
    pub before_round_data_depolarization: Option<f64>,

    /// Flip probability before every measurement
    #[arg(long, env = "TESSEL_BEFORE_MEASURE_FLIP_PROBABILITY")]
    pub before_measure_flip_probability: Option<f64>,

    /// Flip probability after every reset
    #[arg(long, env = "TESSEL_AFTER_RESET_FLIP_PROBABILITY")]
    pub after_reset_flip_probability: Option<f64>,

    /// Only keep steady-state detectors of the memory basis
    #[arg(
        long,
        env = "TESSEL_EXCLUDE_OTHER_BASIS_DETECTORS",
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    pub exclude_other_basis_detectors: Option<bool>,

    /// YAML file with generation settings
    #[arg(short, long, env = "TESSEL_CONFIG")]
    pub config: Option<PathBuf>,
}

impl GenerationArgs {
    fn overrides(&self) -> GenConfig {
        GenConfig {
            code_task: self.code_task.clone(),
            distance: self.distance,
            x_distance: self.x_distance,
            rounds: self.rounds,
            after_clifford_depolarization: self.after_clifford_depolarization,
            before_round_data_depolarization: self.before_round_data_depolarization,
            before_measure_flip_probability: self.before_measure_flip_probability,
            after_reset_flip_probability: self.after_reset_flip_probability,
            exclude_other_basis_detectors: self.exclude_other_basis_detectors,
        }
    }

    /// Merge flags, environment and config file into generation inputs.
    pub fn resolve(&self) -> Result<(CodeTask, CircuitGenParameters)> {
        let file = match &self.config {
            Some(path) => GenConfig::load(path)?,
            None => GenConfig::default(),
        };
        self.overrides().or(file).resolve()
    }
}
