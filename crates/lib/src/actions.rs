//! Job-runner integration.
//!
//! Action inputs arrive as `INPUT_*` environment variables and log/annotation
//! output goes through the runner's workflow-command protocol on stdout
//! (`::group::`, `::endgroup::`, `::error::`). This module implements both
//! ends so the rest of the crate never touches the environment or stdout
//! directly.

use std::env;
use std::io::Write;

use tracing::debug;

/// Read an action input.
///
/// The runner exposes the input `name` as `INPUT_<NAME>` with spaces mapped
/// to underscores and the name uppercased; dashes are preserved, so
/// `install-deps` is read from `INPUT_INSTALL-DEPS`. Values are trimmed.
/// An absent or empty variable reads as `None`.
pub fn get_input(name: &str) -> Option<String> {
  let key = format!("INPUT_{}", name.replace(' ', "_").to_uppercase());
  match env::var(&key) {
    Ok(value) => {
      let trimmed = value.trim();
      if trimmed.is_empty() {
        None
      } else {
        Some(trimmed.to_string())
      }
    }
    Err(_) => None,
  }
}

/// Open a collapsible log group in the job output.
pub fn start_group(title: &str) {
  issue("group", title);
}

/// Close the current log group.
pub fn end_group() {
  issue("endgroup", "");
}

/// Emit an error annotation. The caller is responsible for also exiting
/// non-zero; the annotation alone does not fail the job.
pub fn error(message: &str) {
  issue("error", message);
}

/// Write a workflow command and flush immediately.
///
/// Child processes inherit stdout and write to it concurrently with us, so
/// an unflushed command line could interleave mid-sentence with tool output.
fn issue(command: &str, data: &str) {
  debug!(command, data, "issuing workflow command");
  let mut stdout = std::io::stdout();
  let _ = writeln!(stdout, "::{}::{}", command, escape_data(data));
  let _ = stdout.flush();
}

/// Escape payload data for the workflow-command protocol. An unescaped
/// newline would terminate the command early.
fn escape_data(data: &str) -> String {
  data.replace('%', "%25").replace('\r', "%0D").replace('\n', "%0A")
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn input_read_from_uppercased_env() {
    temp_env::with_var("INPUT_DIR", Some("build"), || {
      assert_eq!(get_input("dir"), Some("build".to_string()));
    });
  }

  #[test]
  fn input_preserves_dashes() {
    temp_env::with_var("INPUT_OPENCV-VERSION", Some("4.5.0"), || {
      assert_eq!(get_input("opencv-version"), Some("4.5.0".to_string()));
    });
  }

  #[test]
  fn input_maps_spaces_to_underscores() {
    temp_env::with_var("INPUT_SOME_NAME", Some("value"), || {
      assert_eq!(get_input("some name"), Some("value".to_string()));
    });
  }

  #[test]
  fn input_trims_whitespace() {
    temp_env::with_var("INPUT_DIR", Some("  build \n"), || {
      assert_eq!(get_input("dir"), Some("build".to_string()));
    });
  }

  #[test]
  fn absent_input_reads_as_none() {
    temp_env::with_var_unset("INPUT_MISSING", || {
      assert_eq!(get_input("missing"), None);
    });
  }

  #[test]
  fn empty_input_reads_as_none() {
    temp_env::with_var("INPUT_DIR", Some(""), || {
      assert_eq!(get_input("dir"), None);
    });
  }

  #[test]
  fn data_escaping() {
    assert_eq!(escape_data("plain"), "plain");
    assert_eq!(escape_data("100%"), "100%25");
    assert_eq!(escape_data("line1\nline2"), "line1%0Aline2");
    assert_eq!(escape_data("a\r\nb"), "a%0D%0Ab");
  }
}
