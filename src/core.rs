//! # Core Module / 核心模块
//!
//! This module contains the core functionality of the plan runner:
//! configuration, data models, plan parsing and the execution loop.
//!
//! 此模块包含计划运行器的核心功能：
//! 配置、数据模型、计划解析和执行循环。

pub mod config;
pub mod execution;
pub mod models;
pub mod plan;

// Re-exports
pub use config::RunConfig;
pub use execution::execute_plan;
pub use models::{RunContext, RunSummary};
pub use plan::{PlanLine, PlanRow, TestPlan};
