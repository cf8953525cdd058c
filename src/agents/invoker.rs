//! Single-agent invocation against the model-call service

use super::{AgentConfig, AgentResult};
use crate::error::OrchestratorError;
use crate::llm::{ModelClient, ModelRequest};
use std::sync::Arc;

/// Performs one request/response exchange per invocation
///
/// No retries are attempted here; retry policy, if any, belongs to the
/// model-call service or the caller.
#[derive(Clone)]
pub struct AgentInvoker {
    client: Arc<dyn ModelClient>,
    max_tokens: usize,
}

impl AgentInvoker {
    pub fn new(client: Arc<dyn ModelClient>) -> Self {
        Self {
            client,
            max_tokens: 4096,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Invoke one agent with a user message
    ///
    /// The response may contain content segments of mixed kinds; only the
    /// text segments are kept, newline-joined in their returned order. A
    /// response with no text segments is a content error.
    pub async fn invoke(
        &self,
        agent: &AgentConfig,
        user_message: &str,
    ) -> Result<AgentResult, OrchestratorError> {
        let request = ModelRequest {
            model: agent.model.clone(),
            temperature: agent.temperature,
            system: agent.instructions.clone(),
            user_message: user_message.to_string(),
            max_tokens: self.max_tokens,
        };

        tracing::debug!(role = %agent.role, model = %agent.model, "invoking agent");
        let response = self.client.call(&request).await?;

        let text_parts: Vec<&str> = response
            .content
            .iter()
            .filter_map(|block| block.as_text())
            .collect();

        if text_parts.is_empty() {
            return Err(OrchestratorError::Content(agent.role));
        }

        tracing::info!(
            role = %agent.role,
            model = %response.model,
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            "agent invocation complete"
        );

        Ok(AgentResult {
            role: agent.role,
            content: text_parts.join("\n"),
            model: response.model,
            usage: response.usage,
        })
    }
}
