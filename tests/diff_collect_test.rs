use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;
use upgrade_helper::diff::{clone_repo, collect, filter, DiffConfig};
use upgrade_helper::HelperError;

/// Builds a scratch repository with two tagged versions to diff between.
struct Scratch {
  dir: TempDir
}

impl Scratch {
  fn new() -> Self {
    let scratch = Scratch { dir: TempDir::new().expect("Could not create temp dir") };
    scratch.git(&["init", "--initial-branch=main"]);
    scratch
  }

  fn path(&self) -> &Path {
    self.dir.path()
  }

  fn git(&self, args: &[&str]) {
    let status = Command::new("git")
      .args(["-c", "user.email=test@example.com", "-c", "user.name=test"])
      .args(args)
      .current_dir(self.path())
      .output()
      .expect("Could not run git");
    assert!(status.status.success(), "git {:?} failed: {}", args, String::from_utf8_lossy(&status.stderr));
  }

  fn write(&self, rel_path: &str, content: &str) {
    let file_path = self.path().join(rel_path);
    if let Some(parent) = file_path.parent() {
      fs::create_dir_all(parent).expect("Could not create parent dirs");
    }
    fs::write(&file_path, content).expect("Could not write file");
  }

  fn commit_and_tag(&self, message: &str, tag: &str) {
    self.git(&["add", "-A"]);
    self.git(&["commit", "-m", message]);
    self.git(&["tag", tag]);
  }
}

fn config_for(scratch: &Scratch, working_dir: PathBuf) -> DiffConfig {
  DiffConfig {
    from_version: "v1".to_string(),
    to_version:   "v2".to_string(),
    repo:         scratch.path().to_string_lossy().into_owned(),
    working_dir
  }
}

#[test]
fn test_collect_between_two_tags() {
  let scratch = Scratch::new();
  scratch.write("go.mod", "module example\n\nrequire cosmossdk.io/math v1.1.0\n");
  scratch.write("app/app.go", "package app\n");
  scratch.commit_and_tag("initial", "v1");

  scratch.write("go.mod", "module example\n\nrequire cosmossdk.io/math v1.2.0\n");
  scratch.write("app/upgrades/v2/upgrades.go", "package v2\n");
  scratch.commit_and_tag("bump math, add upgrade", "v2");

  let clone_parent = TempDir::new().unwrap();
  let dc = config_for(&scratch, clone_parent.path().join("clone"));

  clone_repo(&dc).expect("clone should succeed");
  let diff = collect(&dc).expect("collect should succeed");

  // app/app.go is unchanged between the tags, the other two files differ
  assert_eq!(diff.len(), 2);
  assert!(diff.contains("go.mod"));
  assert!(diff.contains("app/upgrades/v2/upgrades.go"));

  let go_mod = diff.get("go.mod").unwrap();
  assert!(go_mod.iter().any(|l| l == "-require cosmossdk.io/math v1.1.0"));
  assert!(go_mod.iter().any(|l| l == "+require cosmossdk.io/math v1.2.0"));
}

#[test]
fn test_collect_with_identical_tags_is_empty() {
  let scratch = Scratch::new();
  scratch.write("go.mod", "module example\n");
  scratch.commit_and_tag("initial", "v1");
  scratch.git(&["tag", "v2"]);

  let clone_parent = TempDir::new().unwrap();
  let dc = config_for(&scratch, clone_parent.path().join("clone"));

  clone_repo(&dc).expect("clone should succeed");
  let diff = collect(&dc).expect("an empty listing is not an error");
  assert!(diff.is_empty());
  assert!(filter(&diff).is_empty());
}

#[test]
fn test_clone_failure_is_typed() {
  let clone_parent = TempDir::new().unwrap();
  let dc = DiffConfig {
    from_version: "v1".to_string(),
    to_version:   "v2".to_string(),
    repo:         "/nonexistent/repository/path".to_string(),
    working_dir:  clone_parent.path().join("clone")
  };

  let err = clone_repo(&dc).unwrap_err();
  match err.downcast_ref::<HelperError>() {
    Some(HelperError::Clone { status, .. }) => assert_ne!(*status, 0),
    other => panic!("expected Clone error, got {other:?}")
  }
}

#[test]
fn test_unknown_revision_fails_listing() {
  let scratch = Scratch::new();
  scratch.write("go.mod", "module example\n");
  scratch.commit_and_tag("initial", "v1");

  let clone_parent = TempDir::new().unwrap();
  let mut dc = config_for(&scratch, clone_parent.path().join("clone"));
  dc.to_version = "v9".to_string();

  clone_repo(&dc).expect("clone should succeed");
  let err = collect(&dc).unwrap_err();
  assert!(matches!(err.downcast_ref::<HelperError>(), Some(HelperError::DiffList { .. })));
}

#[test]
fn test_collect_then_filter_end_to_end() {
  let scratch = Scratch::new();
  scratch.write("go.mod", "module example\n\nrequire github.com/evmos/evmos/v16 v16.0.0\n");
  scratch.write("README.md", "# example\n");
  scratch.commit_and_tag("initial", "v1");

  scratch.write("go.mod", "module example\n\nrequire github.com/evmos/evmos/v17 v17.0.0\n");
  scratch.write("README.md", "# example\n\nwith docs\n");
  scratch.write("app/app.go", "package app\n\nfunc AddKeeper() {}\n");
  scratch.commit_and_tag("upgrade", "v2");

  let clone_parent = TempDir::new().unwrap();
  let dc = config_for(&scratch, clone_parent.path().join("clone"));

  clone_repo(&dc).expect("clone should succeed");
  let filtered = filter(&collect(&dc).expect("collect should succeed"));

  // README.md is untracked; go.mod survives because the diff context lines
  // (module header, hunk markup) are not import-bump noise
  assert!(!filtered.contains("README.md"));
  assert!(filtered.contains("app/app.go"));
  assert!(filtered
    .get("app/app.go")
    .unwrap()
    .iter()
    .any(|l| l == "+func AddKeeper() {}"));
}
