//! Command execution with live output streaming.
//!
//! Runs a suggested command through `shell -c` in a working directory,
//! echoing stdout line-by-line as it arrives while capturing both streams
//! for the result. Stderr is held back and written once the command
//! finishes so interleaving stays readable.

use std::path::Path;
use std::process::Stdio;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader};
use tokio::process::Command;
use tracing::debug;

/// Outcome of a shell command execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    pub command: String,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl ExecutionResult {
    pub fn succeeded(&self) -> bool {
        self.exit_code == 0
    }
}

/// Runs command strings through a shell with sensible defaults.
pub struct CommandRunner {
    shell: String,
    dry_run: bool,
}

impl CommandRunner {
    pub fn new(shell: impl Into<String>, dry_run: bool) -> Self {
        Self {
            shell: shell.into(),
            dry_run,
        }
    }

    /// Execute a command and return its outcome.
    ///
    /// In dry-run mode the command is printed but not executed and a
    /// synthetic success result is returned. A process killed by a signal
    /// reports exit code -1.
    pub async fn execute(&self, command: &str, cwd: Option<&Path>) -> Result<ExecutionResult> {
        if self.dry_run {
            println!("[dry-run] would execute: {command}");
            return Ok(ExecutionResult {
                command: command.to_string(),
                exit_code: 0,
                stdout: String::new(),
                stderr: String::new(),
            });
        }

        debug!(shell = %self.shell, command, "spawning command");

        let mut builder = Command::new(&self.shell);
        builder
            .arg("-c")
            .arg(command)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = cwd {
            builder.current_dir(dir);
        }

        let mut child = builder
            .spawn()
            .with_context(|| format!("failed to spawn {} -c {command}", self.shell))?;

        let stdout = child
            .stdout
            .take()
            .context("child process stdout was not piped")?;
        let stderr = child
            .stderr
            .take()
            .context("child process stderr was not piped")?;

        let stdout_task = async {
            let mut captured = String::new();
            let mut lines = BufReader::new(stdout).lines();
            while let Some(line) = lines.next_line().await? {
                println!("{line}");
                captured.push_str(&line);
                captured.push('\n');
            }
            Ok::<String, std::io::Error>(captured)
        };
        let stderr_task = async {
            let mut captured = String::new();
            BufReader::new(stderr).read_to_string(&mut captured).await?;
            Ok::<String, std::io::Error>(captured)
        };

        let (stdout_text, stderr_text) = tokio::try_join!(stdout_task, stderr_task)
            .context("failed reading command output")?;

        let status = child.wait().await.context("failed waiting for command")?;
        let exit_code = status.code().unwrap_or(-1);

        if !stderr_text.is_empty() {
            eprint!("{stderr_text}");
        }

        debug!(exit_code, "command finished");

        Ok(ExecutionResult {
            command: command.to_string(),
            exit_code,
            stdout: stdout_text,
            stderr: stderr_text,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_dry_run_returns_synthetic_success() {
        let runner = CommandRunner::new("/bin/sh", true);
        let result = runner.execute("rm -rf /definitely/not/run", None).await.unwrap();

        assert!(result.succeeded());
        assert_eq!(result.stdout, "");
        assert_eq!(result.stderr, "");
    }

    #[tokio::test]
    async fn test_captures_stdout() {
        let runner = CommandRunner::new("/bin/sh", false);
        let result = runner.execute("echo hello", None).await.unwrap();

        assert!(result.succeeded());
        assert_eq!(result.stdout, "hello\n");
    }

    #[tokio::test]
    async fn test_nonzero_exit_code_propagates() {
        let runner = CommandRunner::new("/bin/sh", false);
        let result = runner.execute("exit 3", None).await.unwrap();

        assert!(!result.succeeded());
        assert_eq!(result.exit_code, 3);
    }

    #[tokio::test]
    async fn test_captures_stderr() {
        let runner = CommandRunner::new("/bin/sh", false);
        let result = runner.execute("echo oops >&2", None).await.unwrap();

        assert!(result.succeeded());
        assert_eq!(result.stderr, "oops\n");
    }

    #[tokio::test]
    async fn test_honors_working_directory() {
        let runner = CommandRunner::new("/bin/sh", false);
        let result = runner.execute("pwd", Some(Path::new("/tmp"))).await.unwrap();

        assert!(result.succeeded());
        assert_eq!(result.stdout.trim(), "/tmp");
    }
}
