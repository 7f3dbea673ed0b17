//! External command execution.
//!
//! Every external tool the procedure drives (apt, git, cmake, make) goes
//! through [`run`]: spawn the process, let it stream to the job log, wait
//! for it to exit, and fail on a non-zero status. There are no retries and
//! no output parsing; the tools report their own errors.

use std::fmt;
use std::process::Stdio;

use serde::Serialize;
use thiserror::Error;
use tokio::process::Command;
use tracing::info;

/// Errors from running an external command.
#[derive(Debug, Error)]
pub enum ExecError {
  /// The program could not be started at all.
  #[error("failed to start '{cmd}': {source}")]
  Spawn {
    cmd: String,
    #[source]
    source: std::io::Error,
  },

  /// The program ran and exited non-zero (or was killed by a signal, in
  /// which case there is no code).
  #[error("command failed with exit code {code:?}: {cmd}")]
  CommandFailed { cmd: String, code: Option<i32> },
}

/// One external command: a program and its arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Invocation {
  pub program: String,
  pub args: Vec<String>,
}

impl Invocation {
  pub fn new(program: impl Into<String>, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
    Self {
      program: program.into(),
      args: args.into_iter().map(Into::into).collect(),
    }
  }
}

impl fmt::Display for Invocation {
  /// Render as a shell-style command line for logs and error messages.
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.program)?;
    for arg in &self.args {
      if arg.contains(' ') {
        write!(f, " {:?}", arg)?;
      } else {
        write!(f, " {}", arg)?;
      }
    }
    Ok(())
  }
}

/// Run an external command to completion.
///
/// Stdout and stderr are inherited so the tool's output lands in the job
/// log as it is produced. Returns an error carrying the rendered command
/// line when the process cannot be spawned or exits non-zero.
pub async fn run(invocation: &Invocation) -> Result<(), ExecError> {
  info!(cmd = %invocation, "executing command");

  let status = Command::new(&invocation.program)
    .args(&invocation.args)
    .stdin(Stdio::null())
    .status()
    .await
    .map_err(|e| ExecError::Spawn {
      cmd: invocation.to_string(),
      source: e,
    })?;

  if !status.success() {
    return Err(ExecError::CommandFailed {
      cmd: invocation.to_string(),
      code: status.code(),
    });
  }

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn display_joins_program_and_args() {
    let inv = Invocation::new("git", ["clone", "repo", "--depth", "1"]);
    assert_eq!(inv.to_string(), "git clone repo --depth 1");
  }

  #[test]
  fn display_quotes_args_with_spaces() {
    let inv = Invocation::new("sudo", ["add-apt-repository", "deb http://example.org main"]);
    assert_eq!(inv.to_string(), r#"sudo add-apt-repository "deb http://example.org main""#);
  }

  #[cfg(unix)]
  #[tokio::test]
  async fn successful_command() {
    let inv = Invocation::new("sh", ["-c", "exit 0"]);
    assert!(run(&inv).await.is_ok());
  }

  #[cfg(unix)]
  #[tokio::test]
  async fn failing_command_reports_exit_code() {
    let inv = Invocation::new("sh", ["-c", "exit 3"]);
    match run(&inv).await {
      Err(ExecError::CommandFailed { cmd, code }) => {
        assert_eq!(code, Some(3));
        assert!(cmd.starts_with("sh"));
      }
      other => panic!("expected CommandFailed, got {:?}", other),
    }
  }

  #[tokio::test]
  async fn missing_program_reports_spawn_error() {
    let inv = Invocation::new("definitely-not-a-real-program-4a7f", Vec::<String>::new());
    assert!(matches!(run(&inv).await, Err(ExecError::Spawn { .. })));
  }
}
