use std::path::Path;

use anyhow::Result;
use log::{debug, info};

use super::{DiffConfig, DiffResult};
use crate::commands::run_git;
use crate::error::HelperError;
use crate::profile;

/// Clones the repository configured in `dc` into its working directory.
///
/// The destination is expected to be a fresh (usually temporary) directory;
/// git creates it if it does not exist yet.
pub fn clone_repo(dc: &DiffConfig) -> Result<()> {
  profile!("Clone repository");
  info!("cloning {} into {}", dc.repo, dc.working_dir.display());

  // TODO: only fetch the two tags being compared instead of a full clone
  let parent = dc.working_dir.parent().unwrap_or(Path::new("."));
  let dest = dc.working_dir.to_string_lossy();
  let out = run_git(&["clone", &dc.repo, dest.as_ref()], parent)?;

  if !out.success() {
    return Err(
      HelperError::Clone {
        repo:   dc.repo.clone(),
        status: out.status,
        stderr: out.stderr.trim().to_string()
      }
      .into()
    );
  }

  Ok(())
}

/// Lists the files that differ between the two configured versions, in the
/// order git reports them.
///
/// A successful listing with empty output is a valid, empty result; only a
/// non-zero git exit is an error.
fn changed_files(dc: &DiffConfig) -> Result<Vec<String>> {
  let out = run_git(
    &["--no-pager", "diff", &dc.from_version, &dc.to_version, "--name-only"],
    &dc.working_dir
  )?;

  if !out.success() {
    return Err(
      HelperError::DiffList {
        from:   dc.from_version.clone(),
        to:     dc.to_version.clone(),
        stderr: out.stderr.trim().to_string()
      }
      .into()
    );
  }

  Ok(out.stdout_lines().into_iter().filter(|l| !l.is_empty()).collect())
}

/// Returns the per-file diff between the two versions, split into lines
/// with the diff markup untouched.
fn file_diff(dc: &DiffConfig, path: &str) -> Result<Vec<String>> {
  let out = run_git(
    &["--no-pager", "diff", &dc.from_version, &dc.to_version, "--", path],
    &dc.working_dir
  )?;

  if !out.success() {
    return Err(
      HelperError::DiffList {
        from:   dc.from_version.clone(),
        to:     dc.to_version.clone(),
        stderr: out.stderr.trim().to_string()
      }
      .into()
    );
  }

  Ok(out.stdout_lines())
}

/// Collects the full diff between the configured versions: one name-only
/// listing, then one diff call per changed file. The result preserves the
/// listing order.
pub fn collect(dc: &DiffConfig) -> Result<DiffResult> {
  profile!("Collect diff");

  let files = changed_files(dc)?;
  debug!("[diff] {} changed files between {} and {}", files.len(), dc.from_version, dc.to_version);

  let mut result = DiffResult::new();
  for path in files {
    let lines = file_diff(dc, &path)?;
    result.insert(path, lines);
  }

  Ok(result)
}
