//! Typed errors for the orchestration core
//!
//! Every failure surfaced to a caller carries a stable kind tag (for
//! machine-readable reporting) alongside the human-readable message.

use crate::agents::AgentRole;
use crate::llm::ModelError;
use thiserror::Error;

/// Errors produced by the orchestration core
///
/// The variants map one-to-one onto the failure categories callers need to
/// distinguish:
/// - `Configuration` - missing/invalid per-role setup; fatal at startup
/// - `InvalidRequest` - malformed orchestrator request; no side effects
/// - `NotFound` - unknown pipeline name
/// - `Upstream` - model-call transport/auth/rate-limit failure
/// - `Content` - model returned no usable text
#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// Required per-role configuration is missing or invalid
    ///
    /// Raised when the agent registry is built, before any request is
    /// served. Never raised per-request.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The orchestrator request failed validation
    ///
    /// Reported before any outbound call is attempted.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The requested pipeline does not exist in the catalog
    #[error("unknown pipeline '{0}'")]
    NotFound(String),

    /// The underlying model call failed
    #[error("upstream model call failed: {0}")]
    Upstream(#[from] ModelError),

    /// The model responded, but with no usable text content
    #[error("agent '{0}' returned no text content")]
    Content(AgentRole),
}

impl OrchestratorError {
    /// Stable kind tag for machine-readable error reporting
    pub fn kind(&self) -> &'static str {
        match self {
            OrchestratorError::Configuration(_) => "configuration",
            OrchestratorError::InvalidRequest(_) => "invalid_request",
            OrchestratorError::NotFound(_) => "not_found",
            OrchestratorError::Upstream(_) => "upstream",
            OrchestratorError::Content(_) => "content",
        }
    }
}
