//! # Reporting Module / 报告模块
//!
//! Console progress and summary output for a plan run.
//!
//! 计划运行的控制台进度和摘要输出。

pub mod console;

pub use console::{format_hms, print_summary};
