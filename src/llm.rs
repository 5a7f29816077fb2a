use anyhow::Result;

use crate::model::{Model, Provider};
use crate::{anthropic, openai};

/// One summarization request: a system context describing the bucket being
/// summarized and the diff content to summarize.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
  pub system:     String,
  pub prompt:     String,
  pub max_tokens: u32,
  pub model:      Model
}

#[derive(Debug, Clone, PartialEq)]
pub struct Response {
  pub response: String
}

/// Calls the provider owning the requested model. An unsupported model
/// never reaches this point: parsing the model name fails first.
pub async fn call(request: Request) -> Result<Response> {
  match request.model.provider() {
    Provider::OpenAi => openai::call(request).await,
    Provider::Anthropic => anthropic::call(request).await
  }
}
