use anyhow::{Context, Result};
use clap::{Arg, Command};
use dotenv::dotenv;
use log::info;

use upgrade_helper::config;
use upgrade_helper::diff::{clone_repo, collect, filter, DiffConfig, DiffResult};
use upgrade_helper::model::Model;
use upgrade_helper::summary;

fn cli() -> Command {
  Command::new("upgrade-helper")
    .about("Drafts an upgrade guide between two versions of an evmOS-based chain")
    .arg(Arg::new("from").value_name("FROM").required(true).help("Version tag to compare from, e.g. v15.0.0"))
    .arg(Arg::new("to").value_name("TO").required(true).help("Version tag to compare to, e.g. v16.0.4"))
    .arg(
      Arg::new("model")
        .long("model")
        .short('m')
        .value_name("MODEL")
        .help("Model to summarize with (gpt-4o, gpt-4o-mini or claude-3-5-sonnet-20240620)")
    )
    .arg(Arg::new("repo").long("repo").value_name("URL").help("Repository to diff (defaults to the configured evmOS repo)"))
    .arg(Arg::new("output").long("output").short('o').value_name("FILE").help("Also write the summary to this file"))
}

/// Clones the repository into a temporary directory and collects the diff
/// between the two versions. The clone directory is removed when this
/// returns, on the error path included.
fn collect_diff(from: &str, to: &str, repo: &str) -> Result<DiffResult> {
  let workdir = tempfile::tempdir().context("Failed to create temporary working directory")?;

  let dc = DiffConfig {
    from_version: from.to_string(),
    to_version:   to.to_string(),
    repo:         repo.to_string(),
    working_dir:  workdir.path().to_path_buf()
  };

  clone_repo(&dc)?;
  let diff = collect(&dc)?;

  info!("cleaning up {}", workdir.path().display());
  Ok(diff)
}

#[tokio::main]
async fn main() -> Result<()> {
  dotenv().ok();
  env_logger::init();

  let args = cli().get_matches();
  let from = args.get_one::<String>("from").context("missing from version")?;
  let to = args.get_one::<String>("to").context("missing to version")?;

  // Resolve the model up front so an unsupported name fails before any work
  let model_name = args
    .get_one::<String>("model")
    .cloned()
    .or_else(|| config::APP.model.clone())
    .unwrap_or_default();
  let model: Model = model_name.parse()?;

  let repo = args
    .get_one::<String>("repo")
    .cloned()
    .or_else(|| config::APP.repo.clone())
    .context("no repository configured")?;

  let diff = collect_diff(from, to, &repo)?;
  let filtered = filter(&diff);

  let guide = summary::summarize(model, &filtered).await?;
  println!("{guide}");

  if let Some(path) = args.get_one::<String>("output") {
    std::fs::write(path, format!("{guide}\n")).with_context(|| format!("Failed to write summary to {path}"))?;
    info!("summary written to {path}");
  }

  Ok(())
}
