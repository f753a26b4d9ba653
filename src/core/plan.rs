//! # Test Plan Module / 测试计划模块
//!
//! Parses the line-oriented test plan. Every non-blank line is either a
//! well-formed [`PlanRow`] with exactly five comma-separated fields or a
//! [`MalformedRow`] that the runner reports and skips. Parsing never fails on
//! bad input; only I/O on the plan file itself is an error.
//!
//! 解析面向行的测试计划。每个非空行要么是恰好包含五个逗号分隔字段的 [`PlanRow`]，
//! 要么是运行器报告并跳过的 [`MalformedRow`]。解析永远不会因错误输入而失败；
//! 只有计划文件本身的 I/O 才会产生错误。

use anyhow::{Context, Result};
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::{Path, PathBuf};

/// Number of comma-separated fields in a plan row.
pub const PLAN_FIELD_COUNT: usize = 5;

/// Flag value that marks a row for execution. Anything else disables it.
pub const ENABLED_FLAG: &str = "enabled";

/// Sub-test placeholder meaning "no sub-test".
pub const NO_SUB_TEST: &str = "none";

/// A single well-formed row of the test plan.
/// 测试计划中一个格式正确的行。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanRow {
    /// 1-based line number in the plan file / 计划文件中从 1 开始的行号
    pub line_number: usize,
    pub test_name: String,
    /// Sub-test name, or the literal `none` / 子测试名称，或字面量 `none`
    pub sub_test_name: String,
    pub param_a: String,
    pub param_b: String,
    /// Raw fifth field; only `enabled` turns the row on.
    /// 原始的第五个字段；只有 `enabled` 才会启用该行。
    pub flag: String,
}

impl PlanRow {
    pub fn is_enabled(&self) -> bool {
        self.flag == ENABLED_FLAG
    }

    /// Name used in the results table: `test` or `test-sub`.
    /// 结果表中使用的名称：`test` 或 `test-sub`。
    pub fn display_name(&self) -> String {
        if self.sub_test_name == NO_SUB_TEST {
            self.test_name.clone()
        } else {
            format!("{}-{}", self.test_name, self.sub_test_name)
        }
    }
}

/// A line that did not split into exactly five fields.
/// 未能恰好拆分为五个字段的行。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedRow {
    pub line_number: usize,
    pub field_count: usize,
    pub content: String,
}

impl fmt::Display for MalformedRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line {}: expected {} fields, found {}: '{}'",
            self.line_number, PLAN_FIELD_COUNT, self.field_count, self.content
        )
    }
}

impl std::error::Error for MalformedRow {}

/// The outcome of parsing one non-blank plan line.
/// 解析一个非空计划行的结果。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanLine {
    Row(PlanRow),
    Malformed(MalformedRow),
}

/// Parses a single raw plan line.
///
/// Trailing whitespace (including `\r`) is stripped before splitting on `,`.
/// Fields are kept verbatim; no quoting or escaping is recognised.
///
/// # Arguments
/// * `line_number` - 1-based position of the line in the plan file
/// * `raw` - The line as read from the file
pub fn parse_line(line_number: usize, raw: &str) -> PlanLine {
    let line = raw.trim_end();
    let fields: Vec<&str> = line.split(',').collect();

    match fields.as_slice() {
        [test_name, sub_test_name, param_a, param_b, flag] => PlanLine::Row(PlanRow {
            line_number,
            test_name: test_name.to_string(),
            sub_test_name: sub_test_name.to_string(),
            param_a: param_a.to_string(),
            param_b: param_b.to_string(),
            flag: flag.to_string(),
        }),
        _ => PlanLine::Malformed(MalformedRow {
            line_number,
            field_count: fields.len(),
            content: line.to_string(),
        }),
    }
}

/// A test plan opened for sequential, single-pass reading.
///
/// Iterating yields one [`PlanLine`] per non-blank line in file order.
/// Blank lines are skipped without being reported.
///
/// 一个为顺序、单遍读取而打开的测试计划。
/// 迭代时按文件顺序为每个非空行产生一个 [`PlanLine`]。空行将被静默跳过。
pub struct TestPlan {
    path: PathBuf,
    lines: Lines<BufReader<File>>,
    line_number: usize,
}

impl TestPlan {
    /// Opens the plan file. Failure to open is fatal for the run.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open test plan: {}", path.display()))?;
        Ok(Self {
            path: path.to_path_buf(),
            lines: BufReader::new(file).lines(),
            line_number: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Iterator for TestPlan {
    type Item = Result<PlanLine>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let raw = match self.lines.next()? {
                Ok(raw) => raw,
                Err(e) => {
                    return Some(Err::<PlanLine, _>(e).with_context(|| {
                        format!("Failed to read test plan: {}", self.path.display())
                    }));
                }
            };
            self.line_number += 1;

            if raw.trim_end().is_empty() {
                continue;
            }
            return Some(Ok(parse_line(self.line_number, &raw)));
        }
    }
}
