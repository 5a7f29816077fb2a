//! Turns a filtered diff into a Markdown upgrade-guide draft.
//!
//! The filtered entries are partitioned into three buckets (dependency
//! changes, application wiring, upgrade logic) and each non-empty bucket is
//! summarized with its own system prompt in a single model call.

use anyhow::Result;
use log::info;

use crate::config;
use crate::diff::DiffResult;
use crate::error::HelperError;
use crate::llm::{self, Request};
use crate::model::Model;

const PATH_APP: &str = "app/app.go";
const PATH_GO_MOD: &str = "go.mod";
const PATH_UPGRADES: &str = "app/upgrades";

const GO_MOD_PROMPT: &str = "You are a code change analyzer, specialized in providing a concise \
summary of changes introduced to a Go module file. \
The provided input will be the Git diff output between the go.mod files \
of two compared versions.

The target codebase is Evmos, a Cosmos SDK-based blockchain that offers \
an EVM implementation.

Please make sure to only stick to version changes of the most important \
dependencies: Cosmos SDK, IBC-Go and Go-Ethereum. \
Please also mind the replace directives for Evmos' own forks. \
If there are no changes to the listed main dependencies, please provide no output.";

const APP_CHANGE_PROMPT: &str = "You are a code change analyzer, specialized in providing a \
summary of the made changes in a Git diff output. \
The code base is based on Evmos, a Cosmos SDK-based blockchain \
that offers an EVM implementation, so please consider \
the native elements of this framework when deriving and \
providing the summary of the changes in the main application wiring.

Specifically, pay attention to changes to the code structure \
or additions of modules or module keepers.";

const UPGRADE_CHANGE_PROMPT: &str = "You are a code change analyzer, specialized in providing \
a written summary of the made changes in a series of Git diff outputs.

These outputs describe the changes between two versions of Evmos, \
a Cosmos SDK-based blockchain that offers an EVM implementation, \
which means that the upgrade logic in the given changes relate to \
a chain upgrade of the underlying blockchain.

Please provide a concise summary of the upgrade logic \
at hand. Usually this will include parameter adjustments, \
data migrations or the introduction or removal of modules.";

/// The filtered diff grouped by summary category. Entries outside the
/// three categories (e.g. the changelog) are intentionally not forwarded
/// to the model.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Buckets {
  pub deps:     Option<String>,
  pub wiring:   Option<String>,
  pub upgrades: Vec<(String, String)>
}

impl Buckets {
  pub fn is_empty(&self) -> bool {
    self.deps.is_none() && self.wiring.is_none() && self.upgrades.is_empty()
  }
}

/// Partitions a filtered diff into the three summary buckets, joining each
/// file's lines back into one diff block.
pub fn partition(diff: &DiffResult) -> Buckets {
  let mut buckets = Buckets::default();

  for file in diff.iter() {
    let joined = file.lines.join("\n");
    if file.path == PATH_APP {
      buckets.wiring = Some(joined);
    } else if file.path == PATH_GO_MOD {
      buckets.deps = Some(joined);
    } else if file.path.contains(PATH_UPGRADES) {
      buckets.upgrades.push((file.path.clone(), joined));
    }
  }

  buckets
}

fn upgrade_prompt(upgrades: &[(String, String)]) -> String {
  upgrades
    .iter()
    .map(|(file, change)| format!("{file}:\n{change}"))
    .collect::<Vec<_>>()
    .join("\n")
}

/// Summarizes the filtered changes between the two versions, one model call
/// per non-empty bucket, and joins the answers into a Markdown document.
pub async fn summarize(model: Model, diff: &DiffResult) -> Result<String> {
  let buckets = partition(diff);
  if buckets.is_empty() {
    return Err(HelperError::NoSummarizableChanges.into());
  }

  let mut sections = Vec::new();

  if let Some(deps) = buckets.deps {
    info!("summarizing dependency changes");
    let answer = llm::call(Request {
      system:     GO_MOD_PROMPT.to_string(),
      prompt:     deps,
      max_tokens: config::APP.max_tokens(),
      model
    })
    .await?;
    sections.push(format!("## Dependency upgrades\n\n{}", answer.response.trim()));
  }

  if let Some(wiring) = buckets.wiring {
    info!("summarizing application wiring changes");
    let answer = llm::call(Request {
      system:     APP_CHANGE_PROMPT.to_string(),
      prompt:     wiring,
      max_tokens: config::APP.max_tokens(),
      model
    })
    .await?;
    sections.push(format!("## Application wiring\n\n{}", answer.response.trim()));
  }

  if !buckets.upgrades.is_empty() {
    info!("summarizing upgrade logic changes");
    let answer = llm::call(Request {
      system:     UPGRADE_CHANGE_PROMPT.to_string(),
      prompt:     upgrade_prompt(&buckets.upgrades),
      max_tokens: config::APP.max_tokens(),
      model
    })
    .await?;
    sections.push(format!("## Upgrade logic\n\n{}", answer.response.trim()));
  }

  Ok(sections.join("\n\n"))
}
