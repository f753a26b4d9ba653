//! # Run Command Module / 运行命令模块
//!
//! This module wires a `run_plan` invocation together: configuration,
//! run context, log/results preparation, signal handling, the plan loop
//! and the final summary.
//!
//! 此模块将一次 `run_plan` 调用串联起来：配置、运行上下文、日志/结果准备、
//! 信号处理、计划循环以及最终摘要。

use anyhow::Result;
use chrono::Local;
use std::process::ExitCode;
use tokio::signal;
use tokio_util::sync::CancellationToken;

use crate::{
    cli::CliArgs,
    core::{
        config,
        execution::{execute_plan, prepare_run},
        models::{KNOWN_TARGETS, RunContext, is_known_target},
        plan::TestPlan,
    },
    reporting::console,
    resolve_locale,
};

/// Exit code of a run stopped by Ctrl-C between tests.
pub const INTERRUPTED_EXIT_CODE: u8 = 130;

/// Executes the run command with the provided arguments.
///
/// # Returns
/// `ExitCode::SUCCESS` once the whole plan has been processed, or
/// [`INTERRUPTED_EXIT_CODE`] when the run was cancelled. Setup failures
/// (plan file, log directory, results file) are returned as errors.
pub async fn execute(args: CliArgs) -> Result<ExitCode> {
    let run_config = config::resolve_run_config(args.config.as_deref())?;
    if args.lang.is_none() {
        if let Some(language) = &run_config.language {
            rust_i18n::set_locale(&resolve_locale(Some(language)));
        }
    }

    if !is_known_target(&args.target) {
        console::print_unknown_target(&args.target, KNOWN_TARGETS);
    }

    let plan = TestPlan::open(&args.test_plan)?;
    let ctx = RunContext::new(&run_config, &args.target)?;
    prepare_run(&ctx)?;

    let started_at = Local::now();
    console::print_run_header(plan.path(), &ctx, &started_at);

    let stop_token = setup_signal_handler();
    let summary = execute_plan(plan, &ctx, &run_config, &stop_token).await?;

    console::print_summary(&summary, &Local::now());

    if summary.interrupted {
        Ok(ExitCode::from(INTERRUPTED_EXIT_CODE))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

/// Sets up a Ctrl-C handler that asks the plan loop to stop between tests.
/// The loop never kills a runner that is already executing.
fn setup_signal_handler() -> CancellationToken {
    let token = CancellationToken::new();
    let token_clone = token.clone();

    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            console::print_shutdown_requested();
            token_clone.cancel();
        }
    });

    token
}
