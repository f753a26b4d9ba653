//! # Run Plan Library / Run Plan 库
//!
//! This library drives a hardware test bench from a CSV test plan. Each
//! enabled row launches an external per-test runner against a target board
//! and waits for it; disabled rows are recorded as `NOT_EXECUTED`.
//!
//! 此库根据 CSV 测试计划驱动硬件测试台。每个已启用的行都会针对目标板
//! 启动外部单测试运行器并等待其结束；已禁用的行记录为 `NOT_EXECUTED`。
//!
//! ## Modules / 模块
//!
//! - `core` - Configuration, data models, plan parsing and the execution loop
//! - `infra` - Child process execution, log directory and results file handling
//! - `reporting` - Console progress and summary output
//! - `cli` - Command-line interface and commands
//!
//! - `core` - 配置、数据模型、计划解析和执行循环
//! - `infra` - 子进程执行、日志目录和结果文件处理
//! - `reporting` - 控制台进度和摘要输出
//! - `cli` - 命令行接口和命令

pub mod cli;
pub mod commands;
pub mod core;
pub mod infra;
pub mod reporting;

// Re-export commonly used items
pub use crate::core::config;
pub use crate::core::execution;
pub use crate::core::models;
pub use crate::core::plan;

/// Picks the locale for the application's messages.
///
/// The requested locale (from `--lang` or the config file) wins; otherwise the
/// system locale is used. A full match (e.g. "zh-CN") is tried first, then the
/// language part alone (e.g. "en" from "en-US"), and finally "en".
pub fn resolve_locale(requested: Option<&str>) -> String {
    let locale = requested
        .map(str::to_string)
        .or_else(sys_locale::get_locale)
        .unwrap_or_else(|| "en".to_string());
    let available_locales = rust_i18n::available_locales!();

    if available_locales.contains(&locale.as_str()) {
        locale
    } else {
        locale
            .split('-')
            .next()
            .filter(|lang_code| available_locales.contains(lang_code))
            .unwrap_or("en")
            .to_string()
    }
}

// Initialize i18n
rust_i18n::i18n!("locales", fallback = "en");
