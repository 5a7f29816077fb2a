use log::warn;

use super::DiffResult;
use crate::profile;

/// Files whose changes are relevant for an upgrade guide.
const TRACKED_FILES: [&str; 3] = ["app/app.go", "CHANGELOG.md", "go.mod"];

/// Any file under this directory is relevant as well.
const TRACKED_DIR: &str = "app/upgrades";

/// Marker of a cosmetic major-version import path bump, e.g. the change
/// from github.com/evmos/evmos/v16 to github.com/evmos/evmos/v17.
const IMPORT_BUMP_MARKER: &str = "github.com/evmos/evmos/v";

/// Diffs with more remaining lines than this are considered unsummarizable
/// and skipped with a warning rather than truncated.
const CHANGED_LINES_LIMIT: usize = 5_000;

fn is_tracked(path: &str) -> bool {
  TRACKED_FILES.contains(&path) || path.contains(TRACKED_DIR)
}

/// Generated files that never carry upgrade-relevant logic.
fn is_ignored(path: &str) -> bool {
  path.ends_with("constants.go") || (path.contains(TRACKED_DIR) && path.ends_with("_test.go"))
}

/// Narrows a collected diff down to the entries worth summarizing.
///
/// Keeps tracked paths only, drops ignored files, strips import-bump noise
/// lines and discards entries left empty. Pure and deterministic: the
/// output entries keep their input order and every retained line is
/// verbatim from the input.
pub fn filter(diff: &DiffResult) -> DiffResult {
  profile!("Filter diff");

  let mut filtered = DiffResult::new();

  for file in diff.iter() {
    if !is_tracked(&file.path) || is_ignored(&file.path) {
      continue;
    }

    let changes: Vec<String> = file
      .lines
      .iter()
      .filter(|line| !line.contains(IMPORT_BUMP_MARKER))
      .cloned()
      .collect();

    if changes.is_empty() {
      continue;
    }

    if changes.len() > CHANGED_LINES_LIMIT {
      warn!(
        "skipping changes in {}, which are exceeding the limit of {} changed lines",
        file.path, CHANGED_LINES_LIMIT
      );
      continue;
    }

    filtered.insert(file.path.clone(), changes);
  }

  filtered
}
