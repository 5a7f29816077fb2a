use anyhow::{anyhow, Context, Result};
use colored::*;
use serde::{Deserialize, Serialize};

use crate::error::HelperError;
use crate::llm::{Request, Response};
use crate::{config, profile};

const MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";

#[derive(Debug, Serialize)]
struct MessagesRequest {
  model:      String,
  max_tokens: u32,
  system:     String,
  messages:   Vec<Message>
}

#[derive(Debug, Serialize)]
struct Message {
  role:    &'static str,
  content: String
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
  content: Vec<ContentBlock>
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
  text: String
}

fn validate_key(key: Option<String>) -> Result<String, HelperError> {
  key
    .filter(|key| !key.trim().is_empty())
    .ok_or(HelperError::MissingCredential("Anthropic"))
}

pub async fn call(request: Request) -> Result<Response> {
  profile!("Anthropic API call");

  let body = MessagesRequest {
    model:      request.model.to_string(),
    max_tokens: request.max_tokens,
    system:     request.system,
    messages:   vec![Message { role: "user", content: request.prompt }]
  };

  let client = reqwest::Client::builder()
    .timeout(config::APP.timeout())
    .build()
    .context("Failed to build HTTP client")?;
  let response = client
    .post(MESSAGES_URL)
    .header("x-api-key", validate_key(config::APP.anthropic_api_key())?)
    .header("anthropic-version", API_VERSION)
    .json(&body)
    .send()
    .await
    .context("Failed to reach the Anthropic API")?;

  let status = response.status();
  let text = response.text().await.context("Failed to read Anthropic response")?;

  if !status.is_success() {
    return Err(anyhow!(
      "{} Anthropic API error ({}): {}",
      "ERROR:".bold().bright_red(),
      status,
      text
    ));
  }

  let parsed: MessagesResponse = serde_json::from_str(&text).context("Failed to parse Anthropic response")?;
  let content = parsed.content.first().context("No content returned")?;

  Ok(Response { response: content.text.clone() })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_missing_or_blank_key_is_rejected() {
    assert!(matches!(validate_key(None), Err(HelperError::MissingCredential("Anthropic"))));
    assert!(matches!(validate_key(Some("   ".to_string())), Err(HelperError::MissingCredential("Anthropic"))));
    assert_eq!(validate_key(Some("sk-ant-xxx".to_string())).unwrap(), "sk-ant-xxx");
  }

  #[test]
  fn test_messages_response_parsing() {
    let raw = r###"{
      "id": "msg_01",
      "type": "message",
      "role": "assistant",
      "content": [{"type": "text", "text": "## Dependency upgrades\n\nCosmos SDK bumped."}],
      "stop_reason": "end_turn"
    }"###;
    let parsed: MessagesResponse = serde_json::from_str(raw).unwrap();
    assert_eq!(parsed.content[0].text, "## Dependency upgrades\n\nCosmos SDK bumped.");
  }

  #[test]
  fn test_request_body_shape() {
    let body = MessagesRequest {
      model:      "claude-3-5-sonnet-20240620".to_string(),
      max_tokens: 4096,
      system:     "context".to_string(),
      messages:   vec![Message { role: "user", content: "diff".to_string() }]
    };
    let json = serde_json::to_value(&body).unwrap();
    assert_eq!(json["model"], "claude-3-5-sonnet-20240620");
    assert_eq!(json["max_tokens"], 4096);
    assert_eq!(json["messages"][0]["role"], "user");
  }
}
