//! Typed errors for the upgrade-helper pipeline.
//!
//! Every error here aborts the current run; nothing is retried. The
//! oversized-diff condition is deliberately not an error (see
//! `diff::filter`), it only logs a warning and skips the file.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HelperError {
  #[error("failed to clone {repo}: git exited with status {status}: {stderr}")]
  Clone {
    repo:   String,
    status: i32,
    stderr: String
  },

  #[error("failed to list changes between {from} and {to}: {stderr}")]
  DiffList {
    from:   String,
    to:     String,
    stderr: String
  },

  #[error("found no summarizable changes between the compared versions")]
  NoSummarizableChanges,

  #[error("model {0} is not supported")]
  UnsupportedModel(String),

  #[error("{0} API key not found or malformed")]
  MissingCredential(&'static str)
}
