use std::fs::File;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use config::{Config, FileFormat};
use lazy_static::lazy_static;
use serde::Deserialize;

// Constants
const DEFAULT_TIMEOUT: i64 = 120;
const DEFAULT_MAX_TOKENS: i64 = 4096;
const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_REPO: &str = "https://github.com/evmos/evmos";

#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
pub struct App {
  pub openai_api_key:    Option<String>,
  pub anthropic_api_key: Option<String>,
  pub model:             Option<String>,
  pub repo:              Option<String>,
  pub max_tokens:        Option<usize>,
  pub timeout:           Option<usize>
}

#[derive(Debug)]
pub struct ConfigPaths {
  pub dir:  PathBuf,
  pub file: PathBuf
}

lazy_static! {
  static ref PATHS: ConfigPaths = ConfigPaths::new();
  pub static ref APP: App = App::new().expect("Failed to load config");
}

impl ConfigPaths {
  fn new() -> Self {
    let dir = home::home_dir()
      .expect("Failed to determine home directory")
      .join(".config/upgrade-helper");
    let file = dir.join("config.ini");
    Self { dir, file }
  }

  fn ensure_exists(&self) -> Result<()> {
    if !self.dir.exists() {
      std::fs::create_dir_all(&self.dir).with_context(|| format!("Failed to create config directory at {:?}", self.dir))?;
    }
    if !self.file.exists() {
      File::create(&self.file).with_context(|| format!("Failed to create config file at {:?}", self.file))?;
    }
    Ok(())
  }
}

impl App {
  pub fn new() -> Result<Self> {
    dotenv::dotenv().ok();
    PATHS.ensure_exists()?;

    let config = Config::builder()
      .add_source(config::Environment::with_prefix("UPGRADE_HELPER").try_parsing(true))
      .add_source(config::File::new(PATHS.file.to_string_lossy().as_ref(), FileFormat::Ini))
      .set_default("timeout", DEFAULT_TIMEOUT)?
      .set_default("max_tokens", DEFAULT_MAX_TOKENS)?
      .set_default("model", DEFAULT_MODEL)?
      .set_default("repo", DEFAULT_REPO)?
      .build()?;

    config
      .try_deserialize()
      .context("Failed to deserialize existing config")
  }

  /// API keys come from the conventional environment variables as well, so
  /// a plain `OPENAI_API_KEY` export keeps working alongside the prefixed
  /// config entries.
  pub fn openai_api_key(&self) -> Option<String> {
    self
      .openai_api_key
      .clone()
      .or_else(|| std::env::var("OPENAI_API_KEY").ok())
  }

  pub fn anthropic_api_key(&self) -> Option<String> {
    self
      .anthropic_api_key
      .clone()
      .or_else(|| std::env::var("ANTHROPIC_API_KEY").ok())
  }

  /// Response budget per model call.
  pub fn max_tokens(&self) -> u32 {
    self.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS as usize) as u32
  }

  /// Timeout applied to every outbound HTTP request.
  pub fn timeout(&self) -> Duration {
    Duration::from_secs(self.timeout.unwrap_or(DEFAULT_TIMEOUT as usize) as u64)
  }
}
