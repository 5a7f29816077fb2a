use std::fmt::{self, Display};
use std::str::FromStr;

use crate::error::HelperError;

// Model identifiers as accepted on the command line
const MODEL_GPT4_OPTIMIZED: &str = "gpt-4o";
const MODEL_GPT4_MINI: &str = "gpt-4o-mini";
const MODEL_CLAUDE35_SONNET: &str = "claude-3-5-sonnet-20240620";

/// The service family a model belongs to. Each provider owns its own
/// request building and response extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
  OpenAi,
  Anthropic
}

/// The closed set of models that can be asked for a summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Model {
  /// Optimized GPT-4 model
  GPT4o,
  /// Default model - mini version of GPT-4o for cheaper runs
  #[default]
  GPT4oMini,
  /// Claude 3.5 Sonnet
  Claude35Sonnet
}

impl Model {
  pub fn provider(&self) -> Provider {
    match self {
      Model::GPT4o | Model::GPT4oMini => Provider::OpenAi,
      Model::Claude35Sonnet => Provider::Anthropic
    }
  }
}

impl From<&Model> for &str {
  fn from(model: &Model) -> Self {
    match model {
      Model::GPT4o => MODEL_GPT4_OPTIMIZED,
      Model::GPT4oMini => MODEL_GPT4_MINI,
      Model::Claude35Sonnet => MODEL_CLAUDE35_SONNET
    }
  }
}

impl FromStr for Model {
  type Err = HelperError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim() {
      s if s.eq_ignore_ascii_case(MODEL_GPT4_OPTIMIZED) => Ok(Model::GPT4o),
      s if s.eq_ignore_ascii_case(MODEL_GPT4_MINI) => Ok(Model::GPT4oMini),
      s if s.eq_ignore_ascii_case(MODEL_CLAUDE35_SONNET) => Ok(Model::Claude35Sonnet),
      model => Err(HelperError::UnsupportedModel(model.to_string()))
    }
  }
}

impl Display for Model {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", <&str>::from(self))
  }
}
