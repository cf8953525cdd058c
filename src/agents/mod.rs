//! Agent definitions: roles, configurations, and invocation results

use crate::llm::TokenUsage;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

mod invoker;
mod registry;

pub use invoker::AgentInvoker;
pub use registry::AgentRegistry;

/// Closed set of agent specialties
///
/// Fixed at compile time; not user-extensible at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AgentRole {
    CodeWriter,
    CodeReviewer,
    SecurityAuditor,
    DatabaseAgent,
    TestingAgent,
}

impl AgentRole {
    /// All roles, in stable registry order
    pub const ALL: [AgentRole; 5] = [
        AgentRole::CodeWriter,
        AgentRole::CodeReviewer,
        AgentRole::SecurityAuditor,
        AgentRole::DatabaseAgent,
        AgentRole::TestingAgent,
    ];

    /// Stable string key, used in config tables and CLI arguments
    pub fn key(&self) -> &'static str {
        match self {
            AgentRole::CodeWriter => "code-writer",
            AgentRole::CodeReviewer => "code-reviewer",
            AgentRole::SecurityAuditor => "security-auditor",
            AgentRole::DatabaseAgent => "database-agent",
            AgentRole::TestingAgent => "testing-agent",
        }
    }

    /// Human-readable display name used when config leaves the name blank
    pub fn default_name(&self) -> &'static str {
        match self {
            AgentRole::CodeWriter => "Code Writer",
            AgentRole::CodeReviewer => "Code Reviewer",
            AgentRole::SecurityAuditor => "Security Auditor",
            AgentRole::DatabaseAgent => "Database Agent",
            AgentRole::TestingAgent => "Testing Agent",
        }
    }
}

impl fmt::Display for AgentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for AgentRole {
    type Err = crate::error::OrchestratorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AgentRole::ALL
            .into_iter()
            .find(|role| role.key() == s)
            .ok_or_else(|| {
                crate::error::OrchestratorError::InvalidRequest(format!(
                    "unknown agent role '{s}' (supported: {})",
                    AgentRole::ALL.map(|r| r.key()).join(", ")
                ))
            })
    }
}

/// Immutable configuration for one agent
///
/// `instructions` are sensitive and never appear in public views; see
/// [`AgentMeta`].
#[derive(Debug, Clone)]
pub struct AgentConfig {
    pub role: AgentRole,
    pub name: String,
    pub model: String,
    /// Sampling temperature, 0.0-1.0
    pub temperature: f32,
    /// System instructions defining the agent persona
    pub instructions: String,
}

/// Safe-to-publish agent metadata (instructions stripped by construction)
#[derive(Debug, Clone, Serialize)]
pub struct AgentMeta {
    pub role: AgentRole,
    pub name: String,
    pub model: String,
}

/// Result of one successful agent invocation
#[derive(Debug, Clone, Serialize)]
pub struct AgentResult {
    pub role: AgentRole,
    pub content: String,
    /// Model identifier actually used
    pub model: String,
    pub usage: TokenUsage,
}
