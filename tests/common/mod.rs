// Shared test helpers for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use assert_cmd::prelude::*;
use run_plan::config::{RunConfig, RunnerCommand};
use run_plan::models::RunContext;
use run_plan::plan::{PlanLine, parse_line};
use tempfile::{TempDir, tempdir};

pub const TARGET: &str = "p4080ds";

/// A stand-in for the external per-test runner.
///
/// Invoked as `sh fake_runner.sh <invocations_log> <six row args>`. It records
/// its row arguments, appends a PASS row to the results file (`$6` after the
/// shift) and exits 3 when `param_a` is `fail`.
const FAKE_RUNNER: &str = r#"log="$1"
shift
printf '%s\n' "$*" >> "$log"
name="$1"
if [ "$2" != "none" ]; then
    name="$1-$2"
fi
echo "running $name on $5"
echo "diagnostics for $name" >&2
printf '%s,PASS,1,0,0\n' "$name" >> "$6"
if [ "$3" = "fail" ]; then
    exit 3
fi
exit 0
"#;

pub fn setup_test_environment() -> TempDir {
    tempdir().expect("Failed to create temporary directory")
}

pub fn write_plan(dir: &Path, content: &str) -> PathBuf {
    let plan_path = dir.join("plan.csv");
    fs::write(&plan_path, content).expect("Failed to write test plan");
    plan_path
}

pub fn write_fake_runner(dir: &Path) -> PathBuf {
    let script_path = dir.join("fake_runner.sh");
    fs::write(&script_path, FAKE_RUNNER).expect("Failed to write fake runner");
    script_path
}

pub fn invocations_path(dir: &Path) -> PathBuf {
    dir.join("invocations.txt")
}

pub fn read_invocations(dir: &Path) -> Vec<String> {
    fs::read_to_string(invocations_path(dir))
        .unwrap_or_default()
        .lines()
        .map(str::to_string)
        .collect()
}

/// A config that runs the fake runner with no settle pause.
pub fn fake_runner_config(dir: &Path) -> RunConfig {
    RunConfig {
        settle_secs: 0,
        log_base: dir.join("logs").display().to_string(),
        runner: RunnerCommand {
            program: "sh".to_string(),
            args: vec![
                write_fake_runner(dir).display().to_string(),
                invocations_path(dir).display().to_string(),
            ],
        },
        ..RunConfig::default()
    }
}

/// Writes `fake_runner_config` as `RunPlan.toml` in `dir`.
pub fn write_fake_runner_config(dir: &Path) -> PathBuf {
    let config = fake_runner_config(dir);
    let config_path = dir.join("RunPlan.toml");
    fs::write(&config_path, toml::to_string(&config).expect("Failed to serialize config"))
        .expect("Failed to write config");
    config_path
}

/// A run context with absolute paths inside `dir`.
pub fn context_in(dir: &Path) -> RunContext {
    RunContext {
        target: TARGET.to_string(),
        log_dir: dir.join("logs").join(TARGET),
        results_path: dir.join(format!("{TARGET}_results.txt")),
    }
}

pub fn plan_lines(lines: &[&str]) -> Vec<anyhow::Result<PlanLine>> {
    lines
        .iter()
        .enumerate()
        .map(|(i, line)| Ok(parse_line(i + 1, line)))
        .collect()
}

pub fn read_results(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .expect("Failed to read results file")
        .lines()
        .map(str::to_string)
        .collect()
}

/// The `run_plan` binary, running inside `dir` with colors disabled.
pub fn run_plan_cmd(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("run_plan").expect("binary should be built");
    cmd.current_dir(dir).env("NO_COLOR", "1");
    cmd
}
