//! Model-call service: the outbound capability consumed by the invoker

use crate::config::Config;
use crate::error::OrchestratorError;
use std::sync::Arc;

mod claude;
mod error;
mod types;

pub use claude::ClaudeClient;
pub use error::ModelError;
pub use types::{ContentBlock, ModelRequest, ModelResponse, TokenUsage};

use async_trait::async_trait;

/// Trait for model-call clients
///
/// One implementation per provider; the orchestration core only ever sees
/// this trait. Implementations perform exactly one exchange per `call` and
/// do not retry.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Get the client name
    fn name(&self) -> &str;

    /// Perform one request/response exchange with the model
    async fn call(&self, request: &ModelRequest) -> Result<ModelResponse, ModelError>;
}

/// Create a model-call client from configuration
///
/// Credentials are read from the environment at startup; their absence is a
/// configuration error, never a per-request error.
pub fn create_client(config: &Config) -> Result<Arc<dyn ModelClient>, OrchestratorError> {
    match config.llm.provider.to_lowercase().as_str() {
        "claude" | "anthropic" => {
            let api_key = std::env::var("ANTHROPIC_API_KEY").map_err(|_| {
                OrchestratorError::Configuration(
                    "ANTHROPIC_API_KEY environment variable not set".to_string(),
                )
            })?;
            Ok(Arc::new(ClaudeClient::new(api_key)))
        }
        other => Err(OrchestratorError::Configuration(format!(
            "unknown model provider '{other}' (supported: claude)"
        ))),
    }
}
