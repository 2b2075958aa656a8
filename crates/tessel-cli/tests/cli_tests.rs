//! End-to-end tests of the `tessel` binary.
//!
//! Each test runs the built binary with a clean `TESSEL_*` environment and
//! checks its output and exit status.

use std::path::Path;
use std::process::{Command, Output};

const ROTATED_X_D3_R10: &str =
    include_str!("../../tessel-gen/tests/data/surface_code__rotated_memory_x__d3_r10_noisy.stim");
const TORIC_Z_D3_R2_EXCLUDE: &str = include_str!(
    "../../tessel-gen/tests/data/toric_code__unrotated_memory_z__d3_r2_noisy_exclude.stim"
);

const NOISE_FLAGS: [&str; 8] = [
    "--after-clifford-depolarization",
    "0.001",
    "--before-round-data-depolarization",
    "0.002",
    "--before-measure-flip-probability",
    "0.003",
    "--after-reset-flip-probability",
    "0.004",
];

fn tessel() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_tessel"));
    for (key, _) in std::env::vars() {
        if key.starts_with("TESSEL_") {
            cmd.env_remove(key);
        }
    }
    cmd
}

fn run(cmd: &mut Command) -> Output {
    cmd.output().expect("failed to run tessel")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

// ============================================================================
// generate
// ============================================================================

mod generate {
    use super::*;

    #[test]
    fn test_generate_to_stdout_matches_reference() {
        let output = run(tessel()
            .args(["generate", "-t", "surface_code:rotated_memory_x", "-d", "3", "-r", "10"])
            .args(NOISE_FLAGS));
        assert!(output.status.success(), "{}", stderr(&output));
        assert_eq!(stdout(&output), ROTATED_X_D3_R10);
    }

    #[test]
    fn test_generate_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("toric.stim");
        let output = run(tessel()
            .args(["generate", "-t", "toric_code:unrotated_memory_z", "-d", "3", "-r", "2"])
            .args(NOISE_FLAGS)
            .arg("--exclude-other-basis-detectors")
            .arg("-o")
            .arg(&path));
        assert!(output.status.success(), "{}", stderr(&output));
        assert!(stdout(&output).is_empty());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), TORIC_Z_D3_R2_EXCLUDE);
    }

    #[test]
    fn test_unknown_code_task_fails() {
        let output = run(tessel().args(["generate", "-t", "hex_code:rotated_memory_x"]));
        assert_eq!(output.status.code(), Some(1));
        let err = stderr(&output);
        assert!(err.contains("Error:"));
        assert!(err.contains("Code name hex_code not recognised"));
    }

    #[test]
    fn test_invalid_distance_fails() {
        let output = run(tessel().args(["generate", "-d", "1"]));
        assert_eq!(output.status.code(), Some(1));
        assert!(stderr(&output).contains("Need a distance >= 2, got 1"));
    }
}

// ============================================================================
// configuration precedence
// ============================================================================

mod config {
    use super::*;

    fn write_config(dir: &Path) -> std::path::PathBuf {
        let path = dir.join("tessel.yaml");
        std::fs::write(
            &path,
            "code_task: surface_code:rotated_memory_x\n\
             distance: 3\n\
             rounds: 4\n\
             after_clifford_depolarization: 0.001\n\
             before_round_data_depolarization: 0.002\n\
             before_measure_flip_probability: 0.003\n\
             after_reset_flip_probability: 0.004\n",
        )
        .unwrap();
        path
    }

    #[test]
    fn test_config_file_supplies_settings() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_config(dir.path());
        let output = run(tessel().args(["generate", "-r", "10", "--config"]).arg(&config));
        assert!(output.status.success(), "{}", stderr(&output));
        assert_eq!(stdout(&output), ROTATED_X_D3_R10);
    }

    #[test]
    fn test_environment_overrides_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_config(dir.path());
        let output = run(tessel()
            .args(["generate", "--config"])
            .arg(&config)
            .env("TESSEL_ROUNDS", "10"));
        assert!(output.status.success(), "{}", stderr(&output));
        assert_eq!(stdout(&output), ROTATED_X_D3_R10);
    }

    #[test]
    fn test_flags_override_environment() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_config(dir.path());
        let output = run(tessel()
            .args(["generate", "-r", "10", "--config"])
            .arg(&config)
            .env("TESSEL_ROUNDS", "2"));
        assert!(output.status.success(), "{}", stderr(&output));
        assert_eq!(stdout(&output), ROTATED_X_D3_R10);
    }

    #[test]
    fn test_config_path_from_environment() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_config(dir.path());
        let output = run(tessel()
            .args(["generate", "-r", "10"])
            .env("TESSEL_CONFIG", &config));
        assert!(output.status.success(), "{}", stderr(&output));
        assert_eq!(stdout(&output), ROTATED_X_D3_R10);
    }

    #[test]
    fn test_missing_config_file_fails() {
        let output = run(tessel().args(["generate", "--config", "/nonexistent/tessel.yaml"]));
        assert_eq!(output.status.code(), Some(1));
        assert!(stderr(&output).contains("Failed to read config file"));
    }
}

// ============================================================================
// analyze
// ============================================================================

mod analyze {
    use super::*;

    #[test]
    fn test_analyze_json_report() {
        let output = run(tessel()
            .args(["analyze", "-t", "surface_code:unrotated_memory_z", "-d", "3", "-r", "3"])
            .args(NOISE_FLAGS)
            .args(["--exclude-other-basis-detectors", "--format", "json"]));
        assert!(output.status.success(), "{}", stderr(&output));

        let report: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
        assert_eq!(report["code_task"], "surface_code:unrotated_memory_z");
        assert_eq!(report["graphlike_distance"], 3);
        assert_eq!(report["expected_distance"], 3);
        assert_eq!(report["mechanisms"]["hyperedge"], 0);
        assert_eq!(report["shortest_error"].as_array().unwrap().len(), 3);
        assert_eq!(report["num_observables"], 1);
    }

    #[test]
    fn test_analyze_table_and_dem_file() {
        let dir = tempfile::tempdir().unwrap();
        let dem_path = dir.path().join("model.dem");
        let output = run(tessel()
            .args(["analyze", "-t", "toric_code:unrotated_memory_x", "-d", "2", "-r", "2"])
            .args(NOISE_FLAGS)
            .arg("--dem-output")
            .arg(&dem_path));
        assert!(output.status.success(), "{}", stderr(&output));
        assert!(stdout(&output).contains("Shortest graph-like logical error: 2 mechanisms"));

        let dem = std::fs::read_to_string(&dem_path).unwrap();
        assert!(dem.lines().any(|l| l.starts_with("error(")));
        assert!(dem.lines().any(|l| l.starts_with("detector(")));
    }

    #[test]
    fn test_analyze_noiseless() {
        let output = run(tessel().args(["analyze", "-d", "2", "-r", "2"]));
        assert!(output.status.success(), "{}", stderr(&output));
        assert!(stdout(&output).contains("nothing to analyse"));
    }
}

// ============================================================================
// version
// ============================================================================

#[test]
fn test_version() {
    let output = run(tessel().arg("version"));
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("tessel"));
    assert!(text.contains(env!("CARGO_PKG_VERSION")));
}
