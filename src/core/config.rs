//! # Run Configuration Module / 运行配置模块
//!
//! Defines the configuration injected into a plan run: where logs go, which
//! external program executes a single test, and the timing knobs around it.
//!
//! 定义注入到计划运行中的配置：日志存放位置、执行单个测试的外部程序，
//! 以及与之相关的时间参数。

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Name of the configuration file picked up from the working directory
/// when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "RunPlan.toml";

/// The external per-test runner. The six row arguments are appended after `args`.
/// 外部单测试运行器。六个行参数追加在 `args` 之后。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RunnerCommand {
    /// Executable to launch. `~` and `$VAR` are expanded.
    /// 要启动的可执行文件。支持 `~` 和 `$VAR` 展开。
    #[serde(default = "default_runner_program")]
    pub program: String,
    /// Leading arguments placed before the row arguments.
    /// 放在行参数之前的前置参数。
    #[serde(default = "default_runner_args")]
    pub args: Vec<String>,
}

impl Default for RunnerCommand {
    fn default() -> Self {
        Self {
            program: default_runner_program(),
            args: default_runner_args(),
        }
    }
}

/// Represents the whole run configuration, loaded from a TOML file or defaulted.
/// 代表整个运行配置，从 TOML 文件加载或使用默认值。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RunConfig {
    /// The language for the runner's output messages (e.g., "en", "zh-CN").
    /// 运行器输出消息的语言（例如 "en", "zh-CN"）。
    #[serde(default)]
    pub language: Option<String>,

    /// Base directory under which `<target>/` log directories are created.
    /// 在其下创建 `<target>/` 日志目录的基础目录。
    #[serde(default = "default_log_base")]
    pub log_base: String,

    /// Seconds to pause after each executed test so the bench can settle.
    /// 每个已执行测试之后暂停的秒数，以便测试台稳定下来。
    #[serde(default = "default_settle_secs")]
    pub settle_secs: u64,

    /// Optional per-test timeout in seconds. When unset the runner waits forever.
    /// 可选的单测试超时（秒）。未设置时将无限等待。
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    #[serde(default)]
    pub runner: RunnerCommand,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            language: None,
            log_base: default_log_base(),
            settle_secs: default_settle_secs(),
            timeout_secs: None,
            runner: RunnerCommand::default(),
        }
    }
}

impl RunConfig {
    pub fn settle_delay(&self) -> Duration {
        Duration::from_secs(self.settle_secs)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Resolves `log_base` into a path, expanding `~` and environment variables.
    pub fn log_base_path(&self) -> Result<PathBuf> {
        let expanded = shellexpand::full(&self.log_base)
            .with_context(|| format!("Failed to expand log base path: {}", self.log_base))?;
        Ok(PathBuf::from(expanded.as_ref()))
    }
}

fn default_log_base() -> String {
    "logs".to_string()
}

fn default_settle_secs() -> u64 {
    2
}

fn default_runner_program() -> String {
    "python".to_string()
}

fn default_runner_args() -> Vec<String> {
    vec!["run_test.py".to_string()]
}

/// Loads and parses a run configuration from a TOML file.
///
/// # Arguments
/// * `path` - Path to the configuration file
pub fn load_run_config(path: &Path) -> Result<RunConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: RunConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    Ok(config)
}

/// Resolves the configuration for a run.
///
/// An explicit path must exist. Without one, `RunPlan.toml` in the working
/// directory is used when present, otherwise the defaults apply.
///
/// 显式指定的路径必须存在。未指定时，如果工作目录中存在 `RunPlan.toml` 则使用它，
/// 否则使用默认值。
pub fn resolve_run_config(explicit: Option<&Path>) -> Result<RunConfig> {
    match explicit {
        Some(path) => load_run_config(path),
        None => {
            let fallback = Path::new(DEFAULT_CONFIG_FILE);
            if fallback.is_file() {
                load_run_config(fallback)
            } else {
                Ok(RunConfig::default())
            }
        }
    }
}
