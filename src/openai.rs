use anyhow::{anyhow, Context, Result};
use async_openai::config::OpenAIConfig;
use async_openai::error::OpenAIError;
use async_openai::types::{ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs};
use async_openai::Client;
use colored::*;

use crate::error::HelperError;
use crate::llm::{Request, Response};
use crate::{config, profile};

fn validate_key(key: Option<String>) -> Result<String, HelperError> {
  let key = key.ok_or(HelperError::MissingCredential("OpenAI"))?;

  // OpenAI keys start with "sk-"; anything else is a paste error
  if !key.starts_with("sk-") {
    return Err(HelperError::MissingCredential("OpenAI"));
  }

  Ok(key)
}

pub async fn call(request: Request) -> Result<Response> {
  profile!("OpenAI API call");

  let config = OpenAIConfig::new().with_api_key(validate_key(config::APP.openai_api_key())?);
  let http_client = reqwest::Client::builder()
    .timeout(config::APP.timeout())
    .build()
    .context("Failed to build HTTP client")?;
  let client = Client::with_config(config).with_http_client(http_client);

  let chat_request = CreateChatCompletionRequestArgs::default()
    .max_tokens(request.max_tokens)
    .model(request.model.to_string())
    .messages([
      ChatCompletionRequestSystemMessageArgs::default()
        .content(request.system)
        .build()?
        .into(),
      ChatCompletionRequestUserMessageArgs::default()
        .content(request.prompt)
        .build()?
        .into()
    ])
    .build()?;

  let response = match client.chat().create(chat_request).await {
    Ok(response) => response,
    Err(OpenAIError::ApiError(e)) => {
      return Err(anyhow!(
        "{} OpenAI API error: {}\n    {}",
        "ERROR:".bold().bright_red(),
        e.message,
        "Check that your API key is valid and has credits".yellow()
      ));
    }
    Err(err) => {
      return Err(anyhow!("{} Failed to reach OpenAI: {}", "ERROR:".bold().bright_red(), err));
    }
  };

  let content = response
    .choices
    .first()
    .context("No choices returned")?
    .message
    .content
    .clone()
    .context("No content returned")?;

  Ok(Response { response: content })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_valid_key_shape_passes() {
    assert_eq!(validate_key(Some("sk-proj-abc123".to_string())).unwrap(), "sk-proj-abc123");
  }

  #[test]
  fn test_malformed_key_is_rejected() {
    let err = validate_key(Some("not-a-key".to_string())).unwrap_err();
    assert!(matches!(err, HelperError::MissingCredential("OpenAI")));
    assert!(err.to_string().contains("not found or malformed"));
  }

  #[test]
  fn test_absent_key_is_rejected() {
    assert!(matches!(validate_key(None), Err(HelperError::MissingCredential("OpenAI"))));
  }
}
