//! Diff acquisition and filtering between two version tags.
//!
//! The pipeline is strictly sequential: clone the repository, list the
//! changed files, fetch the per-file diffs, then filter down to the paths
//! that matter for an upgrade guide.

mod collect;
mod filter;

pub use collect::{clone_repo, collect};
pub use filter::filter;

use std::path::PathBuf;

/// Immutable description of the diff to obtain. Built once per invocation.
#[derive(Debug, Clone)]
pub struct DiffConfig {
  pub from_version: String,
  pub to_version:   String,
  pub repo:         String,
  pub working_dir:  PathBuf
}

/// One changed file and its diff output, split into lines with the +/-
/// markup preserved exactly as git emitted it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDiff {
  pub path:  String,
  pub lines: Vec<String>
}

/// Ordered collection of per-file diffs. Paths are unique and iteration
/// order matches the order of the name-only listing that produced them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffResult {
  files: Vec<FileDiff>
}

impl DiffResult {
  pub fn new() -> Self {
    Self::default()
  }

  /// Appends an entry, replacing any existing entry with the same path.
  pub fn insert(&mut self, path: impl Into<String>, lines: Vec<String>) {
    let path = path.into();
    if let Some(existing) = self.files.iter_mut().find(|f| f.path == path) {
      existing.lines = lines;
    } else {
      self.files.push(FileDiff { path, lines });
    }
  }

  pub fn get(&self, path: &str) -> Option<&[String]> {
    self
      .files
      .iter()
      .find(|f| f.path == path)
      .map(|f| f.lines.as_slice())
  }

  pub fn contains(&self, path: &str) -> bool {
    self.files.iter().any(|f| f.path == path)
  }

  pub fn iter(&self) -> impl Iterator<Item = &FileDiff> {
    self.files.iter()
  }

  pub fn paths(&self) -> impl Iterator<Item = &str> {
    self.files.iter().map(|f| f.path.as_str())
  }

  pub fn len(&self) -> usize {
    self.files.len()
  }

  pub fn is_empty(&self) -> bool {
    self.files.is_empty()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn lines(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
  }

  #[test]
  fn test_insert_preserves_order() {
    let mut result = DiffResult::new();
    result.insert("go.mod", lines(&["+a"]));
    result.insert("app/app.go", lines(&["+b"]));
    result.insert("CHANGELOG.md", lines(&["+c"]));

    let paths: Vec<_> = result.paths().collect();
    assert_eq!(paths, vec!["go.mod", "app/app.go", "CHANGELOG.md"]);
  }

  #[test]
  fn test_insert_keeps_paths_unique() {
    let mut result = DiffResult::new();
    result.insert("go.mod", lines(&["+a"]));
    result.insert("go.mod", lines(&["+b"]));

    assert_eq!(result.len(), 1);
    assert_eq!(result.get("go.mod").unwrap(), &["+b".to_string()]);
  }

  #[test]
  fn test_get_missing_path() {
    let result = DiffResult::new();
    assert!(result.get("nope").is_none());
    assert!(!result.contains("nope"));
  }
}
