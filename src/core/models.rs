//! # Data Models Module / 数据模型模块
//!
//! This module defines the data structures shared across a plan run: the
//! immutable run context, the outcome of a single plan row, and the summary
//! printed at shutdown.
//!
//! 此模块定义了计划运行中共享的数据结构：不可变的运行上下文、
//! 单个计划行的结果以及结束时打印的摘要。

use crate::core::config::RunConfig;
use anyhow::Result;
use std::path::PathBuf;
use std::process::ExitStatus;
use std::time::Duration;

/// Hardware targets the bench is known to support.
/// The set is advisory: other identifiers are accepted with a warning.
///
/// 测试台已知支持的硬件目标。该集合仅供参考：其他标识符会在警告后被接受。
pub const KNOWN_TARGETS: &[&str] = &["p4080ds", "p3041ds", "p5020ds", "p4080ds_hw"];

pub fn is_known_target(target: &str) -> bool {
    KNOWN_TARGETS.contains(&target)
}

/// Immutable values for one invocation of the runner.
/// 运行器单次调用的不可变值。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunContext {
    /// Hardware target identifier / 硬件目标标识符
    pub target: String,
    /// `<log_base>/<target>`, reset at the start of every run.
    /// `<log_base>/<target>`，每次运行开始时重置。
    pub log_dir: PathBuf,
    /// `<target>_results.txt`, relative to the working directory.
    /// `<target>_results.txt`，相对于当前工作目录。
    pub results_path: PathBuf,
}

impl RunContext {
    pub fn new(config: &RunConfig, target: &str) -> Result<Self> {
        Ok(Self {
            target: target.to_string(),
            log_dir: config.log_base_path()?.join(target),
            results_path: PathBuf::from(results_file_name(target)),
        })
    }
}

pub fn results_file_name(target: &str) -> String {
    format!("{target}_results.txt")
}

/// How a child process came to an end.
/// 子进程的结束方式。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildExit {
    Exited(ExitStatus),
    /// The configured timeout elapsed and the child was killed.
    /// 配置的超时已到，子进程已被终止。
    TimedOut(Duration),
}

impl ChildExit {
    pub fn success(&self) -> bool {
        matches!(self, ChildExit::Exited(status) if status.success())
    }
}

/// Outcome of processing one well-formed plan row.
/// 处理一个格式正确的计划行的结果。
#[derive(Debug)]
pub enum RowOutcome {
    /// The external runner was launched and has finished.
    /// 外部运行器已启动并已结束。
    Executed { exit: ChildExit, duration: Duration },
    /// The external runner could not be launched at all.
    /// 外部运行器根本无法启动。
    SpawnFailed { error: String, duration: Duration },
    /// The row was disabled and a placeholder row was recorded.
    /// 该行被禁用，并记录了一个占位行。
    NotExecuted,
}

impl RowOutcome {
    /// Whether the runner ended in a way worth flagging to the operator.
    /// These never fail the run.
    pub fn is_runner_problem(&self) -> bool {
        match self {
            RowOutcome::Executed { exit, .. } => !exit.success(),
            RowOutcome::SpawnFailed { .. } => true,
            RowOutcome::NotExecuted => false,
        }
    }
}

/// Totals for a finished (or interrupted) run.
/// 已完成（或被中断）运行的汇总。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Well-formed rows processed, the 1-based counter's final value.
    pub rows: usize,
    pub executed: usize,
    pub not_executed: usize,
    /// Lines skipped because they did not have five fields.
    pub malformed: usize,
    /// Executed rows whose runner exited non-zero, timed out, or never started.
    pub runner_problems: usize,
    /// Set when cancellation stopped the run before the end of the plan.
    pub interrupted: bool,
    pub duration: Duration,
}

impl RunSummary {
    pub fn record(&mut self, outcome: &RowOutcome) {
        match outcome {
            RowOutcome::Executed { .. } | RowOutcome::SpawnFailed { .. } => self.executed += 1,
            RowOutcome::NotExecuted => self.not_executed += 1,
        }
        if outcome.is_runner_problem() {
            self.runner_problems += 1;
        }
    }
}
