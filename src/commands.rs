use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result};
use log::debug;

/// Captured output of a finished `git` invocation.
///
/// Stdout is passed through line-for-line as emitted by git; no trimming
/// beyond the final newline split happens here.
#[derive(Debug, Clone)]
pub struct CommandOutput {
  pub status: i32,
  pub stdout: String,
  pub stderr: String
}

impl CommandOutput {
  pub fn success(&self) -> bool {
    self.status == 0
  }

  /// Stdout split into individual lines, markup preserved.
  pub fn stdout_lines(&self) -> Vec<String> {
    self.stdout.lines().map(str::to_string).collect()
  }
}

/// Runs `git` with the given arguments inside `dir`.
///
/// The working directory is passed to the child process directly instead of
/// chdir-ing the whole process, so callers never share mutable process state.
pub fn run_git(args: &[&str], dir: &Path) -> Result<CommandOutput> {
  debug!("[git] {} (in {})", args.join(" "), dir.display());

  let output = Command::new("git")
    .args(args)
    .current_dir(dir)
    .output()
    .with_context(|| format!("Failed to execute git {}", args.join(" ")))?;

  Ok(CommandOutput {
    status: output.status.code().unwrap_or(-1),
    stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
    stderr: String::from_utf8_lossy(&output.stderr).into_owned()
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_run_git_reports_exit_status() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_git(&["--version"], dir.path()).unwrap();
    assert!(out.success());
    assert!(out.stdout.starts_with("git version"));
  }

  #[test]
  fn test_run_git_captures_stderr_on_failure() {
    let dir = tempfile::tempdir().unwrap();
    // Not a repository, so status should fail with a message on stderr
    let out = run_git(&["status"], dir.path()).unwrap();
    assert!(!out.success());
    assert!(!out.stderr.is_empty());
  }

  #[test]
  fn test_stdout_lines_preserves_order() {
    let out = CommandOutput {
      status: 0,
      stdout: "app/app.go\ngo.mod\n".to_string(),
      stderr: String::new()
    };
    assert_eq!(out.stdout_lines(), vec!["app/app.go", "go.mod"]);
  }
}
