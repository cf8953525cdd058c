//! Shared types for the model-call service

use serde::{Deserialize, Serialize};

/// One request/response exchange with the underlying model
#[derive(Debug, Clone)]
pub struct ModelRequest {
    pub model: String,
    /// Sampling temperature, 0.0-1.0
    pub temperature: f32,
    /// System instructions for the agent persona
    pub system: String,
    pub user_message: String,
    /// Output token budget
    pub max_tokens: usize,
}

/// Normalized response from the model-call service
#[derive(Debug, Clone)]
pub struct ModelResponse {
    /// Model identifier actually used (may differ from the requested alias)
    pub model: String,
    /// Content segments in the order the model returned them
    pub content: Vec<ContentBlock>,
    pub usage: TokenUsage,
}

/// One content segment of a model response, tagged by kind
///
/// Matches the Anthropic Messages API block shape; kinds this crate does not
/// consume (tool use, thinking, etc.) deserialize as `Other` and are
/// discarded by the invoker.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text { text: String },
    #[serde(other)]
    Other,
}

impl ContentBlock {
    pub fn text(text: impl Into<String>) -> Self {
        ContentBlock::Text { text: text.into() }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ContentBlock::Text { text } => Some(text),
            ContentBlock::Other => None,
        }
    }
}

/// Token usage reported by the model-call service
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}
