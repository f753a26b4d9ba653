//! # Command Module Unit Tests / Command 模块单元测试
//!
//! Tests for `spawn_and_capture` and command-line rendering.
//!
//! 测试 `spawn_and_capture` 和命令行渲染。

use run_plan::infra::command::{display_command_line, spawn_and_capture};
use run_plan::models::ChildExit;
use std::time::{Duration, Instant};
use tokio::process::Command;

fn sh(script: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(script);
    cmd
}

#[cfg(all(test, unix))]
mod spawn_and_capture_tests {
    use super::*;

    #[tokio::test]
    async fn test_captures_stdout_and_stderr() {
        let (exit, output) = spawn_and_capture(sh("echo to-stdout; echo to-stderr >&2"), None).await;

        let exit = exit.unwrap();
        assert!(exit.success());
        assert!(output.contains("to-stdout\n"));
        assert!(output.contains("to-stderr\n"));
    }

    #[tokio::test]
    async fn test_non_zero_exit_is_not_an_error() {
        let (exit, _) = spawn_and_capture(sh("exit 7"), None).await;

        match exit.unwrap() {
            ChildExit::Exited(status) => {
                assert!(!status.success());
                assert_eq!(status.code(), Some(7));
            }
            other => panic!("expected an exit status, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_program_is_reported() {
        let cmd = Command::new("this_command_definitely_does_not_exist_12345");
        let (exit, output) = spawn_and_capture(cmd, None).await;

        assert!(exit.is_err());
        assert!(output.is_empty());
    }

    #[tokio::test]
    async fn test_finishes_within_timeout() {
        let (exit, output) =
            spawn_and_capture(sh("echo quick"), Some(Duration::from_secs(10))).await;

        assert!(exit.unwrap().success());
        assert_eq!(output, "quick\n");
    }

    #[tokio::test]
    async fn test_timeout_kills_the_child() {
        let limit = Duration::from_millis(200);
        let start = Instant::now();

        let (exit, output) = spawn_and_capture(sh("echo started; exec sleep 30"), Some(limit)).await;

        let exit = exit.unwrap();
        assert_eq!(exit, ChildExit::TimedOut(limit));
        assert!(!exit.success());
        assert!(start.elapsed() < Duration::from_secs(10));
        assert!(output.contains("started"));
    }

    #[tokio::test]
    async fn test_background_process_holding_pipes_does_not_block() {
        let start = Instant::now();

        let (exit, output) = spawn_and_capture(sh("sleep 8 & echo started; exit 0"), None).await;

        assert!(exit.unwrap().success());
        assert!(start.elapsed() < Duration::from_secs(3));
        assert!(output.contains("started"));
    }

    #[tokio::test]
    async fn test_invalid_utf8_output_keeps_the_child_running() {
        let temp_dir = tempfile::tempdir().unwrap();
        let marker = temp_dir.path().join("marker");
        let script = format!(
            "printf '\\377\\n'; sleep 1; echo after-bad-byte || exit 9; echo row >> '{}'",
            marker.display()
        );

        let (exit, output) = spawn_and_capture(sh(&script), None).await;

        assert!(exit.unwrap().success());
        assert!(marker.exists());
        assert!(output.contains('\u{FFFD}'));
        assert!(output.contains("after-bad-byte\n"));
    }
}

#[cfg(test)]
mod display_command_line_tests {
    use super::*;

    #[test]
    fn test_plain_arguments() {
        let args = vec!["run_test.py".to_string(), "memtest".to_string(), "none".to_string()];
        assert_eq!(
            display_command_line("python", &args),
            "python run_test.py memtest none"
        );
    }

    #[test]
    fn test_arguments_with_spaces_are_quoted() {
        let args = vec!["two words".to_string()];
        assert_eq!(display_command_line("runner", &args), "runner 'two words'");
    }
}
