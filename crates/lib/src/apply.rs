//! Plan execution.
//!
//! Runs a [`SetupPlan`] section by section, each wrapped in a runner log
//! group. Steps are strictly sequential: every child process is awaited
//! before the next step starts. The first failure short-circuits everything
//! that remains; there is no recovery and no rollback.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::actions;
use crate::exec::{self, ExecError};
use crate::plan::{Section, SetupPlan, Step};

/// Errors that can occur while executing a plan.
#[derive(Debug, Error)]
pub enum SetupError {
  /// An external command could not be started or exited non-zero.
  #[error(transparent)]
  Exec(#[from] ExecError),

  /// Creating the install directory failed.
  #[error("failed to create directory '{path}': {source}")]
  CreateDir {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  /// Relocating the build output failed.
  #[error("failed to move '{from}' to '{to}': {source}")]
  Move {
    from: PathBuf,
    to: PathBuf,
    #[source]
    source: std::io::Error,
  },

  /// Deleting a scratch directory failed.
  #[error("failed to remove '{path}': {source}")]
  RemoveDir {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
}

/// Execute the plan.
///
/// Each section opens a log group that is closed again before the result
/// propagates, so a failing step's annotation is not swallowed by a
/// collapsed group.
pub async fn apply(plan: &SetupPlan) -> Result<(), SetupError> {
  for section in &plan.sections {
    actions::start_group(&section.title);
    let result = apply_section(section).await;
    actions::end_group();
    result?;
  }

  Ok(())
}

async fn apply_section(section: &Section) -> Result<(), SetupError> {
  for step in &section.steps {
    apply_step(step).await?;
  }
  Ok(())
}

async fn apply_step(step: &Step) -> Result<(), SetupError> {
  debug!(step = %step.describe(), "applying step");

  match step {
    Step::Run(invocation) => exec::run(invocation).await?,

    Step::CreateDir(path) => {
      tokio::fs::create_dir_all(path).await.map_err(|e| SetupError::CreateDir {
        path: path.clone(),
        source: e,
      })?;
    }

    Step::Move { from, to } => {
      tokio::fs::rename(from, to).await.map_err(|e| SetupError::Move {
        from: from.clone(),
        to: to.clone(),
        source: e,
      })?;
    }

    Step::RemoveDir(path) => remove_dir_tolerant(path).await?,
  }

  Ok(())
}

/// Delete a directory tree, treating a missing path as success. The cleanup
/// section removes the extra-modules checkout whether or not it was cloned.
async fn remove_dir_tolerant(path: &Path) -> Result<(), SetupError> {
  match tokio::fs::remove_dir_all(path).await {
    Ok(()) => Ok(()),
    Err(e) if e.kind() == ErrorKind::NotFound => {
      debug!(path = %path.display(), "nothing to remove");
      Ok(())
    }
    Err(e) => Err(SetupError::RemoveDir {
      path: path.to_path_buf(),
      source: e,
    }),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::exec::Invocation;
  use tempfile::TempDir;

  fn single_section(steps: Vec<Step>) -> SetupPlan {
    SetupPlan {
      sections: vec![Section {
        title: "Test".to_string(),
        steps,
      }],
    }
  }

  // Relies on rename-over-empty-directory, which is the Unix rename(2)
  // behavior the non-cached flow depends on.
  #[cfg(unix)]
  #[tokio::test]
  async fn create_move_remove_round() {
    let temp = TempDir::new().unwrap();
    let source = temp.path().join("scratch/build");
    let dest = temp.path().join("installed");

    tokio::fs::create_dir_all(&source).await.unwrap();
    tokio::fs::write(source.join("Makefile"), "install:\n").await.unwrap();

    let plan = single_section(vec![
      Step::CreateDir(dest.clone()),
      Step::Move {
        from: source.clone(),
        to: dest.clone(),
      },
      Step::RemoveDir(temp.path().join("scratch")),
    ]);

    apply(&plan).await.unwrap();

    assert!(dest.join("Makefile").exists());
    assert!(!temp.path().join("scratch").exists());
  }

  #[tokio::test]
  async fn removing_missing_directory_is_a_no_op() {
    let temp = TempDir::new().unwrap();
    let plan = single_section(vec![Step::RemoveDir(temp.path().join("never-created"))]);

    assert!(apply(&plan).await.is_ok());
  }

  #[cfg(unix)]
  #[tokio::test]
  async fn failure_short_circuits_later_steps() {
    let temp = TempDir::new().unwrap();
    let marker = temp.path().join("marker");

    let plan = SetupPlan {
      sections: vec![
        Section {
          title: "Fails".to_string(),
          steps: vec![Step::Run(Invocation::new("sh", ["-c", "exit 1"]))],
        },
        Section {
          title: "Never reached".to_string(),
          steps: vec![Step::CreateDir(marker.clone())],
        },
      ],
    };

    let err = apply(&plan).await.unwrap_err();
    assert!(matches!(err, SetupError::Exec(ExecError::CommandFailed { code: Some(1), .. })));
    assert!(!marker.exists());
  }

  #[cfg(unix)]
  #[tokio::test]
  async fn failure_message_names_the_command() {
    let plan = single_section(vec![Step::Run(Invocation::new("sh", ["-c", "exit 7"]))]);

    let err = apply(&plan).await.unwrap_err();
    let message = err.to_string();
    assert!(message.contains("exit code Some(7)"));
    assert!(message.contains("sh"));
  }

  #[tokio::test]
  async fn move_failure_reports_paths() {
    let temp = TempDir::new().unwrap();
    let from = temp.path().join("absent");
    let to = temp.path().join("dest");

    let plan = single_section(vec![Step::Move {
      from: from.clone(),
      to: to.clone(),
    }]);

    let err = apply(&plan).await.unwrap_err();
    match err {
      SetupError::Move { from: f, to: t, .. } => {
        assert_eq!(f, from);
        assert_eq!(t, to);
      }
      other => panic!("expected Move error, got {:?}", other),
    }
  }
}
