//! # Infrastructure Module / 基础设施模块
//!
//! This module provides infrastructure services for the plan runner,
//! including child process execution, log directory handling and the
//! results file.
//!
//! 此模块为计划运行器提供基础设施服务，
//! 包括子进程执行、日志目录处理和结果文件。

pub mod command;
pub mod fs;
pub mod results;

// Re-export i18n functions for easier access
pub use rust_i18n::t;
