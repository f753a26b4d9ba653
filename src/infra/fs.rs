//! # File System Operations Module / 文件系统操作模块
//!
//! Log directory management for a plan run.
//!
//! 计划运行的日志目录管理。

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Deletes `log_dir` if it exists, then recreates it (with any missing parents).
/// Nothing from a previous run survives.
///
/// 如果 `log_dir` 存在则删除它，然后重新创建（包括缺失的父目录）。
/// 上一次运行的内容不会保留。
pub fn reset_log_dir(log_dir: &Path) -> Result<()> {
    if log_dir.exists() {
        fs::remove_dir_all(log_dir).with_context(|| {
            format!("Failed to clean up old log directory: {}", log_dir.display())
        })?;
    }
    fs::create_dir_all(log_dir)
        .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;
    Ok(())
}

/// Path of the file holding a row's captured runner output,
/// e.g. `003_memtest-sub1.log`.
pub fn runner_log_path(log_dir: &Path, row_number: usize, display_name: &str) -> PathBuf {
    let sanitized_name = display_name
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '.' { c } else { '_' })
        .collect::<String>();
    log_dir.join(format!("{row_number:03}_{sanitized_name}.log"))
}

/// Writes captured runner output into the log directory.
pub fn write_runner_log(path: &Path, output: &str) -> Result<()> {
    fs::write(path, output)
        .with_context(|| format!("Failed to write runner log: {}", path.display()))
}
