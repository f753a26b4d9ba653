//! # Plan Execution Module / 计划执行模块
//!
//! This module drives a test plan row by row. Enabled rows launch the external
//! per-test runner and wait for it; disabled rows get a `NOT_EXECUTED`
//! placeholder in the results file. Rows are never processed concurrently.
//!
//! 此模块逐行驱动测试计划。已启用的行会启动外部单测试运行器并等待其结束；
//! 已禁用的行会在结果文件中写入 `NOT_EXECUTED` 占位行。各行永远不会并发处理。

use anyhow::{Context, Result};
use std::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::{
    core::{
        config::{RunConfig, RunnerCommand},
        models::{RowOutcome, RunContext, RunSummary},
        plan::{PlanLine, PlanRow},
    },
    infra::{command, fs, results},
    reporting::console,
};

/// The six positional arguments handed to the external runner:
/// test name, sub-test name, param_a, param_b, target, results path.
///
/// 传给外部运行器的六个位置参数：测试名、子测试名、param_a、param_b、目标、结果文件路径。
pub fn runner_arguments(row: &PlanRow, ctx: &RunContext) -> Vec<String> {
    vec![
        row.test_name.clone(),
        row.sub_test_name.clone(),
        row.param_a.clone(),
        row.param_b.clone(),
        ctx.target.clone(),
        ctx.results_path.display().to_string(),
    ]
}

/// Resolves the program and full argument list for one row: the configured
/// leading arguments followed by [`runner_arguments`].
pub fn runner_invocation(
    runner: &RunnerCommand,
    row: &PlanRow,
    ctx: &RunContext,
) -> Result<(String, Vec<String>)> {
    let program = shellexpand::full(&runner.program)
        .with_context(|| format!("Failed to expand runner program: {}", runner.program))?
        .to_string();

    let mut args = runner.args.clone();
    args.extend(runner_arguments(row, ctx));
    Ok((program, args))
}

/// Builds the child command. Arguments are passed as a vector, never through a shell.
/// 构建子进程命令。参数以向量形式传递，从不经过 shell。
pub fn build_runner_command(program: &str, args: &[String]) -> tokio::process::Command {
    let mut cmd = tokio::process::Command::new(program);
    cmd.args(args);
    cmd
}

/// Resets the log directory and writes a fresh results header.
/// Both are fatal on failure.
///
/// 重置日志目录并写入新的结果表头。任何一步失败都是致命的。
pub fn prepare_run(ctx: &RunContext) -> Result<()> {
    fs::reset_log_dir(&ctx.log_dir)?;
    results::create_results_file(&ctx.results_path)?;
    Ok(())
}

/// Launches the external runner for an enabled row and blocks until it exits.
///
/// The child's exit status is reported but never turned into an error; the
/// runner is responsible for writing its own result row. Its captured output
/// is kept in the log directory.
///
/// # Arguments
/// * `number` - The 1-based row counter, used to name the output log
/// * `row` - The enabled plan row
/// * `ctx` - The run context
/// * `config` - Supplies the runner command and optional timeout
pub async fn run_enabled_row(
    number: usize,
    row: &PlanRow,
    ctx: &RunContext,
    config: &RunConfig,
) -> Result<RowOutcome> {
    let (program, args) = runner_invocation(&config.runner, row, ctx)?;
    console::print_command_line(&command::display_command_line(&program, &args));

    let cmd = build_runner_command(&program, &args);

    let start_time = Instant::now();
    let (exit, output) = command::spawn_and_capture(cmd, config.timeout()).await;
    let duration = start_time.elapsed();

    let log_path = fs::runner_log_path(&ctx.log_dir, number, &row.display_name());
    if let Err(e) = fs::write_runner_log(&log_path, &output) {
        console::print_runner_log_failed(&e);
    }

    Ok(match exit {
        Ok(exit) => RowOutcome::Executed { exit, duration },
        Err(e) => RowOutcome::SpawnFailed {
            error: format!("{program}: {e}"),
            duration,
        },
    })
}

/// Records a disabled row as `NOT_EXECUTED` in the results file.
pub fn record_disabled_row(row: &PlanRow, ctx: &RunContext) -> Result<RowOutcome> {
    results::append_not_executed(&ctx.results_path, &row.display_name())?;
    Ok(RowOutcome::NotExecuted)
}

/// Runs every line of a plan in order.
///
/// Malformed lines are reported, counted and skipped. `stop_token` is checked
/// before each line and during the settle pause, never while a runner is
/// executing, so an interrupted run always stops between tests.
///
/// 按顺序运行计划的每一行。格式错误的行会被报告、计数并跳过。
/// `stop_token` 在每一行之前以及稳定等待期间检查，运行器执行期间从不检查，
/// 因此被中断的运行总是在测试之间停止。
///
/// # Returns
/// A `RunSummary` with the totals; `interrupted` is set when the token stopped the run.
pub async fn execute_plan<I>(
    plan: I,
    ctx: &RunContext,
    config: &RunConfig,
    stop_token: &CancellationToken,
) -> Result<RunSummary>
where
    I: IntoIterator<Item = Result<PlanLine>>,
{
    let start_time = Instant::now();
    let mut summary = RunSummary::default();

    for line in plan {
        if stop_token.is_cancelled() {
            summary.interrupted = true;
            break;
        }

        let row = match line? {
            PlanLine::Row(row) => row,
            PlanLine::Malformed(malformed) => {
                console::print_malformed_row(&malformed);
                summary.malformed += 1;
                continue;
            }
        };

        summary.rows += 1;
        console::print_row_banner(summary.rows, &row);

        let outcome = if row.is_enabled() {
            run_enabled_row(summary.rows, &row, ctx, config).await?
        } else {
            record_disabled_row(&row, ctx)?
        };
        console::print_row_outcome(&row, &outcome);
        summary.record(&outcome);

        if !matches!(outcome, RowOutcome::NotExecuted) {
            tokio::select! {
                biased;
                _ = stop_token.cancelled() => {}
                _ = tokio::time::sleep(config.settle_delay()) => {}
            }
        }
    }

    summary.duration = start_time.elapsed();
    Ok(summary)
}
