//! agentry: multi-agent orchestration over a model-call service
//!
//! This library provides:
//! - A build-once registry of role-specialized agent configurations
//! - Single, parallel fan-out, and sequential pipeline execution strategies
//! - An orchestrator entry point with an `auto` mode resolver
//! - A Claude model-call client behind the `ModelClient` trait

pub mod agents;
pub mod config;
pub mod error;
pub mod llm;
pub mod orchestration;

pub use agents::{AgentInvoker, AgentRegistry, AgentResult, AgentRole};
pub use config::Config;
pub use error::OrchestratorError;
pub use orchestration::{Mode, Orchestrator, OrchestratorRequest, OrchestratorResponse};
