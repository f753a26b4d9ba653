//! # Console Reporting Module / 控制台报告模块
//!
//! Progress and summary output for a plan run. Every line is localized and
//! colored: blue for progress, yellow for warnings, red for errors.
//!
//! 计划运行的进度和摘要输出。每一行都经过本地化和着色：
//! 蓝色表示进度，黄色表示警告，红色表示错误。

use chrono::{DateTime, Local};
use colored::*;
use std::path::Path;
use std::time::Duration;

use crate::core::models::{ChildExit, RowOutcome, RunContext, RunSummary};
use crate::core::plan::{MalformedRow, PlanRow};
use crate::infra::t;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Formats a duration as `HH:MM:SS`. Hours keep counting past 24.
/// 将持续时间格式化为 `HH:MM:SS`。小时数超过 24 时继续累加。
pub fn format_hms(duration: Duration) -> String {
    let total = duration.as_secs();
    format!(
        "{:02}:{:02}:{:02}",
        total / 3600,
        (total % 3600) / 60,
        total % 60
    )
}

pub fn format_timestamp(at: &DateTime<Local>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Prints where the run reads from and writes to, and when it started.
pub fn print_run_header(plan_path: &Path, ctx: &RunContext, started_at: &DateTime<Local>) {
    println!(
        "{}",
        t!("run.loading_plan", path = plan_path.display()).cyan()
    );
    println!("{}", t!("run.log_dir", path = ctx.log_dir.display()).cyan());
    println!(
        "{}",
        t!("run.results_file", path = ctx.results_path.display()).cyan()
    );
    println!(
        "{}",
        t!("run.started_at", time = format_timestamp(started_at)).bold()
    );
}

pub fn print_unknown_target(target: &str, known: &[&str]) {
    println!(
        "{}",
        t!("run.unknown_target", target = target, targets = known.join(", ")).yellow()
    );
}

/// Prints the per-row progress banner:
///
/// ```text
/// ===Test 3===
///
/// memtest - sub1 : enabled
/// ```
pub fn print_row_banner(number: usize, row: &PlanRow) {
    println!("\n{}\n", t!("run.row_banner", number = number).bold());
    println!(
        "{}",
        t!(
            "run.row_line",
            name = &row.test_name,
            sub = &row.sub_test_name,
            flag = &row.flag
        )
    );
}

pub fn print_malformed_row(malformed: &MalformedRow) {
    eprintln!(
        "{}",
        t!("run.malformed_row", detail = malformed.to_string()).red()
    );
}

pub fn print_command_line(command_line: &str) {
    println!("{} {}", t!("run.command_prefix").blue(), command_line);
}

pub fn print_not_executed(display_name: &str) {
    println!(
        "{}",
        t!("run.not_executed", name = display_name).dimmed()
    );
}

/// Prints the elapsed time of one executed row and, when the runner did not
/// end cleanly, a warning. Runner problems never stop the plan.
///
/// 打印一个已执行行的耗时；当运行器未正常结束时打印警告。运行器的问题永远不会中止计划。
pub fn print_row_outcome(row: &PlanRow, outcome: &RowOutcome) {
    let name = row.display_name();
    match outcome {
        RowOutcome::Executed { exit, duration } => {
            match exit {
                ChildExit::Exited(status) if !status.success() => println!(
                    "{}",
                    t!("run.runner_exit_nonzero", name = &name, status = status).yellow()
                ),
                ChildExit::TimedOut(limit) => println!(
                    "{}",
                    t!("run.runner_timed_out", name = &name, timeout = limit.as_secs()).yellow()
                ),
                ChildExit::Exited(_) => {}
            }
            println!("{}", t!("run.test_duration", duration = format_hms(*duration)));
        }
        RowOutcome::SpawnFailed { error, duration } => {
            println!(
                "{}",
                t!("run.runner_spawn_failed", name = &name, error = error).yellow()
            );
            println!("{}", t!("run.test_duration", duration = format_hms(*duration)));
        }
        RowOutcome::NotExecuted => print_not_executed(&name),
    }
}

pub fn print_runner_log_failed(error: &anyhow::Error) {
    eprintln!(
        "{}",
        t!("run.runner_log_failed", error = format!("{error:#}")).yellow()
    );
}

pub fn print_shutdown_requested() {
    println!("\n{}", t!("run.shutdown_signal").yellow());
}

/// Prints the closing banner with totals and the overall wall-clock duration.
///
/// # Output Format / 输出格式
/// ```text
/// ======================================
/// Run finished at 2024-05-01 12:00:00
/// Tests: 4 (executed: 2, not executed: 2), malformed lines: 1
/// Total duration: 00:12:31
/// ```
pub fn print_summary(summary: &RunSummary, finished_at: &DateTime<Local>) {
    println!("\n\n{}", t!("report.banner").bold());
    println!(
        "{}",
        t!("report.finished_at", time = format_timestamp(finished_at))
    );
    println!(
        "{}",
        t!(
            "report.counts",
            rows = summary.rows,
            executed = summary.executed,
            not_executed = summary.not_executed,
            malformed = summary.malformed
        )
    );
    if summary.runner_problems > 0 {
        println!(
            "{}",
            t!("report.runner_problems", count = summary.runner_problems).yellow()
        );
    }
    if summary.interrupted {
        println!("{}", t!("report.interrupted").yellow().bold());
    }
    println!(
        "{}",
        t!("report.total_duration", duration = format_hms(summary.duration)).bold()
    );
}
