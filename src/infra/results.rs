//! # Results File Module / 结果文件模块
//!
//! The results file is a comma-separated table shared with the external
//! runner. This side only ever creates it with its header and appends
//! placeholder rows for tests that were not executed.
//!
//! 结果文件是与外部运行器共享的逗号分隔表格。
//! 本侧只负责创建带表头的文件，并为未执行的测试追加占位行。

use anyhow::{Context, Result};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

pub const RESULTS_HEADER: &str = "Test Name,Result,Passes,Fails,Timeouts";

pub const NOT_EXECUTED: &str = "NOT_EXECUTED";

/// Formats the placeholder row for a disabled test. Counts are left empty.
pub fn not_executed_row(display_name: &str) -> String {
    format!("{display_name},{NOT_EXECUTED},,,")
}

/// Creates (or truncates) the results file and writes the header line.
/// The handle is closed before returning.
///
/// 创建（或截断）结果文件并写入表头行。返回前关闭文件句柄。
pub fn create_results_file(path: &Path) -> Result<()> {
    let mut file = File::create(path)
        .with_context(|| format!("Failed to create results file: {}", path.display()))?;
    writeln!(file, "{RESULTS_HEADER}")
        .with_context(|| format!("Failed to write results header: {}", path.display()))?;
    Ok(())
}

/// Appends a `NOT_EXECUTED` row and flushes it straight away, so the row
/// survives a crash later in the run.
///
/// 追加一行 `NOT_EXECUTED` 并立即刷新，以便该行在之后的崩溃中得以保留。
pub fn append_not_executed(path: &Path, display_name: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open results file: {}", path.display()))?;
    writeln!(file, "{}", not_executed_row(display_name))
        .and_then(|_| file.flush())
        .with_context(|| format!("Failed to append to results file: {}", path.display()))?;
    Ok(())
}
