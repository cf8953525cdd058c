//! Claude (Anthropic) model-call client
//!
//! SECURITY: the API key is ONLY sent to the official Anthropic endpoint,
//! never to any third-party service.

use super::{ContentBlock, ModelClient, ModelError, ModelRequest, ModelResponse, TokenUsage};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Official Anthropic API endpoint - API key is ONLY sent here
const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";

pub struct ClaudeClient {
    client: reqwest::Client,
    api_key: String,
}

impl ClaudeClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl ModelClient for ClaudeClient {
    fn name(&self) -> &str {
        "claude"
    }

    async fn call(&self, request: &ModelRequest) -> Result<ModelResponse, ModelError> {
        let body = MessagesRequest {
            model: &request.model,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            system: &request.system,
            messages: vec![WireMessage {
                role: "user",
                content: &request.user_message,
            }],
        };

        let response = self
            .client
            .post(ANTHROPIC_API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(ModelError::from_network_error)?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(ModelError::from_http_status(status, error_text));
        }

        let body: MessagesResponse = response
            .json()
            .await
            .map_err(|e| ModelError::Malformed(e.to_string()))?;

        Ok(ModelResponse {
            model: body.model,
            content: body.content,
            usage: TokenUsage {
                input_tokens: body.usage.input_tokens,
                output_tokens: body.usage.output_tokens,
            },
        })
    }
}

// Anthropic Messages API wire types

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: usize,
    temperature: f32,
    system: &'a str,
    messages: Vec<WireMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    model: String,
    content: Vec<ContentBlock>,
    usage: WireUsage,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct WireUsage {
    input_tokens: u32,
    output_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_messages_response_body() {
        let raw = r#"{
            "id": "msg_01",
            "type": "message",
            "role": "assistant",
            "model": "claude-sonnet-4-20250514",
            "content": [
                {"type": "text", "text": "first"},
                {"type": "tool_use", "id": "t1", "name": "lookup", "input": {}},
                {"type": "text", "text": "second"}
            ],
            "stop_reason": "end_turn",
            "usage": {"input_tokens": 12, "output_tokens": 7}
        }"#;

        let parsed: MessagesResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.model, "claude-sonnet-4-20250514");
        assert_eq!(parsed.content.len(), 3);
        assert_eq!(parsed.content[0].as_text(), Some("first"));
        assert!(parsed.content[1].as_text().is_none());
        assert_eq!(parsed.usage.input_tokens, 12);
        assert_eq!(parsed.usage.output_tokens, 7);
    }

    #[test]
    fn request_body_serializes_system_and_temperature() {
        let body = MessagesRequest {
            model: "claude-sonnet-4-20250514",
            max_tokens: 1024,
            temperature: 0.5,
            system: "You review code.",
            messages: vec![WireMessage {
                role: "user",
                content: "check this",
            }],
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["system"], "You review code.");
        assert_eq!(json["temperature"], 0.5);
        assert_eq!(json["messages"][0]["role"], "user");
    }
}
