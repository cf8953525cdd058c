//! Build-once registry of agent configurations
//!
//! Constructed at startup from config; read-only afterwards, so it is safe
//! to share across concurrent invocations without synchronization.

use super::{AgentConfig, AgentMeta, AgentRole};
use crate::config::Config;
use crate::error::OrchestratorError;

#[derive(Debug)]
pub struct AgentRegistry {
    /// One entry per role, in `AgentRole::ALL` order
    agents: Vec<AgentConfig>,
}

impl AgentRegistry {
    /// Build the registry from configuration
    ///
    /// Fails with a configuration error naming the offending role if its
    /// instructions are missing or its temperature is out of range. This
    /// runs before any invocation is attempted, never lazily mid-request.
    pub fn from_config(config: &Config) -> Result<Self, OrchestratorError> {
        let mut agents = Vec::with_capacity(AgentRole::ALL.len());

        for role in AgentRole::ALL {
            let settings = config.agents.get(role);

            if settings.instructions.trim().is_empty() {
                return Err(OrchestratorError::Configuration(format!(
                    "agent '{role}' has no instructions configured ([agents.{}] in {})",
                    role.key(),
                    Config::config_path()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|_| "config.toml".to_string()),
                )));
            }
            if !(0.0..=1.0).contains(&settings.temperature) {
                return Err(OrchestratorError::Configuration(format!(
                    "agent '{role}' temperature {} is outside 0.0-1.0",
                    settings.temperature
                )));
            }

            let name = if settings.name.trim().is_empty() {
                role.default_name().to_string()
            } else {
                settings.name.clone()
            };

            agents.push(AgentConfig {
                role,
                name,
                model: settings.model.clone(),
                temperature: settings.temperature,
                instructions: settings.instructions.clone(),
            });
        }

        Ok(Self { agents })
    }

    /// Look up the configuration for a role
    ///
    /// Total: construction guarantees an entry for every role.
    pub fn get(&self, role: AgentRole) -> &AgentConfig {
        // Vec order matches AgentRole::ALL, which matches discriminant order.
        &self.agents[role as usize]
    }

    /// All agent configurations in stable role order
    pub fn all(&self) -> &[AgentConfig] {
        &self.agents
    }

    /// Publishable metadata view; never includes instructions
    pub fn public_meta(&self) -> Vec<AgentMeta> {
        self.agents
            .iter()
            .map(|agent| AgentMeta {
                role: agent.role,
                name: agent.name.clone(),
                model: agent.model.clone(),
            })
            .collect()
    }
}
