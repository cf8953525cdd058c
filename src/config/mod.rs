//! Configuration management for agentry
//!
//! One `[agents.<role>]` table per role; instructions are required and their
//! absence fails registry construction at startup.

use crate::agents::AgentRole;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub llm: LlmConfig,
    pub agents: AgentsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Model-call provider ("claude")
    pub provider: String,
    /// Output token budget per invocation
    pub max_tokens: usize,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "claude".to_string(),
            max_tokens: 4096,
        }
    }
}

/// Per-role agent tables
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AgentsConfig {
    #[serde(rename = "code-writer")]
    pub code_writer: AgentSettings,
    #[serde(rename = "code-reviewer")]
    pub code_reviewer: AgentSettings,
    #[serde(rename = "security-auditor")]
    pub security_auditor: AgentSettings,
    #[serde(rename = "database-agent")]
    pub database_agent: AgentSettings,
    #[serde(rename = "testing-agent")]
    pub testing_agent: AgentSettings,
}

impl AgentsConfig {
    pub fn get(&self, role: AgentRole) -> &AgentSettings {
        match role {
            AgentRole::CodeWriter => &self.code_writer,
            AgentRole::CodeReviewer => &self.code_reviewer,
            AgentRole::SecurityAuditor => &self.security_auditor,
            AgentRole::DatabaseAgent => &self.database_agent,
            AgentRole::TestingAgent => &self.testing_agent,
        }
    }
}

/// Settings for one agent role
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentSettings {
    /// Display name; blank falls back to the role's default name
    pub name: String,
    pub model: String,
    /// Sampling temperature, 0.0-1.0
    pub temperature: f32,
    /// System instructions; required, checked at registry construction
    pub instructions: String,
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            name: String::new(),
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.2,
            instructions: String::new(),
        }
    }
}

impl Config {
    /// Load configuration from the default location or fall back to defaults
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Config::default())
        }
    }

    /// Load configuration from an explicit path
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        if let Some(proj_dirs) = directories::ProjectDirs::from("", "", "agentry") {
            let config_dir = proj_dirs.config_dir();
            std::fs::create_dir_all(config_dir)?;
            Ok(config_dir.join("config.toml"))
        } else {
            Ok(PathBuf::from("config.toml"))
        }
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<PathBuf> {
        let config_path = Self::config_path()?;
        let content = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(config_path)
    }

    /// A runnable starter configuration with instruction presets for every
    /// role; written by `agentry init`
    pub fn starter() -> Self {
        let preset = |temperature: f32, instructions: &str| AgentSettings {
            name: String::new(),
            model: DEFAULT_MODEL.to_string(),
            temperature,
            instructions: instructions.to_string(),
        };

        Self {
            llm: LlmConfig::default(),
            agents: AgentsConfig {
                code_writer: preset(
                    0.3,
                    "You are an expert software engineer. Write clean, working code \
                     for the given request. Include brief usage notes but keep prose \
                     to a minimum.",
                ),
                code_reviewer: preset(
                    0.1,
                    "You are a meticulous code reviewer. Examine the provided code \
                     for bugs, unclear naming, and missing edge-case handling. \
                     Report concrete findings with suggested fixes.",
                ),
                security_auditor: preset(
                    0.1,
                    "You are a security auditor. Analyze the provided code or design \
                     for vulnerabilities: injection, authentication gaps, unsafe \
                     deserialization, secret handling. Rate each finding by severity.",
                ),
                database_agent: preset(
                    0.2,
                    "You are a database specialist. Design schemas, write queries, \
                     and advise on indexing and migrations. Prefer portable SQL and \
                     call out any engine-specific syntax.",
                ),
                testing_agent: preset(
                    0.2,
                    "You are a testing specialist. Given code or a design, produce a \
                     test plan and concrete test cases covering the happy path, edge \
                     cases, and failure modes.",
                ),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_no_instructions() {
        let config = Config::default();
        for role in AgentRole::ALL {
            assert!(config.agents.get(role).instructions.is_empty());
        }
        assert_eq!(config.llm.provider, "claude");
        assert_eq!(config.llm.max_tokens, 4096);
    }

    #[test]
    fn starter_fills_instructions_for_every_role() {
        let config = Config::starter();
        for role in AgentRole::ALL {
            let settings = config.agents.get(role);
            assert!(!settings.instructions.is_empty(), "missing {role}");
            assert!((0.0..=1.0).contains(&settings.temperature));
        }
    }

    #[test]
    fn round_trips_through_toml() {
        let config = Config::starter();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&serialized).unwrap();

        assert_eq!(
            parsed.agents.code_writer.instructions,
            config.agents.code_writer.instructions
        );
        assert_eq!(parsed.llm.max_tokens, config.llm.max_tokens);
    }

    #[test]
    fn loads_from_an_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, toml::to_string_pretty(&Config::starter()).unwrap()).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert!(!config.agents.testing_agent.instructions.is_empty());
    }

    #[test]
    fn parses_partial_toml_with_role_tables() {
        let raw = r#"
            [llm]
            max_tokens = 2048

            [agents.security-auditor]
            model = "claude-opus-4-20250514"
            temperature = 0.0
            instructions = "Audit everything."
        "#;

        let config: Config = toml::from_str(raw).unwrap();
        assert_eq!(config.llm.max_tokens, 2048);
        assert_eq!(config.llm.provider, "claude");

        let auditor = config.agents.get(AgentRole::SecurityAuditor);
        assert_eq!(auditor.instructions, "Audit everything.");
        assert_eq!(auditor.temperature, 0.0);
        // Untouched roles keep defaults.
        assert!(config.agents.code_writer.instructions.is_empty());
    }
}
