//! # Command Execution Module / 命令执行模块
//!
//! Spawns the external per-test runner, drains its output streams and waits
//! for it to exit.
//!
//! 启动外部单测试运行器，读取其输出流并等待其退出。

use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::core::models::ChildExit;
use crate::infra::t;

/// How long the output readers may keep draining after the child has exited.
/// Background processes started by the runner can hold the pipes open forever.
const READER_GRACE_PERIOD: Duration = Duration::from_millis(500);

/// Spawns a command, captures its stdout and stderr, and blocks until it exits.
/// The output streams are read concurrently and combined into a single string.
///
/// With `timeout` set, a child still running when it elapses is killed and
/// reported as [`ChildExit::TimedOut`]. Without it the wait is unbounded.
///
/// 派生一个命令，捕获其 stdout 和 stderr，并阻塞直到其退出。
/// 输出流被并发读取并合并到一个字符串中。
///
/// 设置 `timeout` 后，超时仍在运行的子进程会被终止并报告为 [`ChildExit::TimedOut`]。
/// 未设置时等待没有上限。
///
/// # Returns
/// A tuple containing:
/// - How the process ended, wrapped in an `io::Result`.
/// - The combined stdout and stderr as a `String`.
pub async fn spawn_and_capture(
    mut cmd: tokio::process::Command,
    timeout: Option<Duration>,
) -> (std::io::Result<ChildExit>, String) {
    let mut child = match cmd
        .stdin(std::process::Stdio::null())
        .stdout(std::process::Stdio::piped())
        .stderr(std::process::Stdio::piped())
        .kill_on_drop(true)
        .spawn()
    {
        Ok(child) => child,
        Err(e) => return (Err(e), String::new()),
    };

    let (Some(stdout), Some(stderr)) = (child.stdout.take(), child.stderr.take()) else {
        return (
            Err(std::io::Error::other(t!("command.capture_failed").to_string())),
            String::new(),
        );
    };

    // Shared buffer so both readers append as lines arrive.
    let output = Arc::new(tokio::sync::Mutex::new(String::new()));
    let stdout_handle = drain_lines(stdout, Arc::clone(&output));
    let stderr_handle = drain_lines(stderr, Arc::clone(&output));

    let exit = match timeout {
        None => child.wait().await.map(ChildExit::Exited),
        Some(limit) => match tokio::time::timeout(limit, child.wait()).await {
            Ok(status) => status.map(ChildExit::Exited),
            Err(_) => match child.kill().await {
                Ok(()) => Ok(ChildExit::TimedOut(limit)),
                Err(e) => Err(e),
            },
        },
    };

    // A killed child may leave grandchildren holding the pipes open.
    if matches!(exit, Ok(ChildExit::TimedOut(_))) {
        stdout_handle.abort();
        stderr_handle.abort();
    }
    let deadline = Instant::now() + READER_GRACE_PERIOD;
    for mut handle in [stdout_handle, stderr_handle] {
        let waited = tokio::time::timeout_at(deadline, &mut handle).await;
        let joined = match waited {
            Ok(joined) => joined,
            Err(_) => {
                handle.abort();
                handle.await
            }
        };
        if let Err(e) = joined {
            if !e.is_cancelled() {
                eprintln!("Failed to join output reader task: {}", e);
            }
        }
    }

    let captured = output.lock().await.clone();
    (exit, captured)
}

/// Reads a stream line by line until EOF. Bytes that are not valid UTF-8 are
/// replaced rather than ending the read, so the child never sees a closed pipe.
fn drain_lines<R>(stream: R, output: Arc<tokio::sync::Mutex<String>>) -> JoinHandle<()>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut reader = BufReader::new(stream);
        let mut buf = Vec::new();
        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf).await {
                Ok(0) | Err(_) => break,
                Ok(_) => {}
            }
            let line = String::from_utf8_lossy(&buf);
            let line = line.trim_end_matches(['\r', '\n']);
            let mut output = output.lock().await;
            output.push_str(line);
            output.push('\n');
        }
    })
}

/// Renders an argument vector as a copy-pasteable shell line, for display only.
/// 将参数向量渲染为可复制粘贴的 shell 命令行，仅用于显示。
pub fn display_command_line(program: &str, args: &[String]) -> String {
    let parts: Vec<&str> = std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .collect();
    shlex::try_join(parts.iter().copied()).unwrap_or_else(|_| parts.join(" "))
}
