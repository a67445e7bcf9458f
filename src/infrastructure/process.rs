//! # Process Runner
//!
//! Runs local system utilities on behalf of command handlers. Arguments are
//! always passed as a discrete argv — user text never reaches a shell — and
//! any argument carrying a shell metacharacter is rejected outright, in case
//! a delegate utility shells out internally.

use crate::domain::error::ProcessError;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// Characters that end, chain, or substitute commands in a POSIX shell.
const SHELL_METACHARACTERS: &[char] = &[
    ';', '&', '|', '$', '`', '<', '>', '(', ')', '{', '}', '\\', '\n',
];

#[derive(Debug, Clone)]
pub struct ProcessRunner {
    timeout: Duration,
}

impl ProcessRunner {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Hard validation rule: no argument may contain a shell metacharacter.
    pub fn validate_args(args: &[&str]) -> Result<(), ProcessError> {
        for arg in args {
            if arg.contains(SHELL_METACHARACTERS) {
                return Err(ProcessError::Rejected(arg.to_string()));
            }
        }
        Ok(())
    }

    /// Run a utility and capture its stdout, waiting at most the configured
    /// timeout. A non-zero exit is not an error; partial or empty output is
    /// acceptable and returned as-is.
    pub async fn run_sync(&self, program: &str, args: &[&str]) -> Result<String, ProcessError> {
        Self::validate_args(args)?;

        let child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| ProcessError::Spawn {
                program: program.to_string(),
                source,
            })?;

        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| ProcessError::Timeout {
                program: program.to_string(),
                timeout: self.timeout,
            })?
            .map_err(|source| ProcessError::Spawn {
                program: program.to_string(),
                source,
            })?;

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }

    /// Launch a utility detached, with no captured output. The child is
    /// reaped in the background; its exit status is only logged.
    pub fn spawn_detached(&self, program: &str, args: &[&str]) -> Result<(), ProcessError> {
        Self::validate_args(args)?;

        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| ProcessError::Spawn {
                program: program.to_string(),
                source,
            })?;

        let program = program.to_string();
        tokio::spawn(async move {
            match child.wait().await {
                Ok(status) if !status.success() => {
                    tracing::warn!("{} exited with {}", program, status);
                }
                Ok(_) => {}
                Err(e) => tracing::warn!("failed to reap {}: {}", program, e),
            }
        });

        Ok(())
    }
}
