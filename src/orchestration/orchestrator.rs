//! The orchestrator: mode resolution and strategy dispatch

use super::dispatcher::ParallelDispatcher;
use super::pipeline::{PipelineCatalog, PipelineResult, PipelineRunner};
use crate::agents::{AgentConfig, AgentInvoker, AgentRegistry, AgentResult, AgentRole};
use crate::config::Config;
use crate::error::OrchestratorError;
use crate::llm::ModelClient;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Role used when `auto` resolves to single and the request names no role
pub const DEFAULT_ROLE: AgentRole = AgentRole::CodeWriter;

/// Execution strategy requested by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Single,
    Parallel,
    Pipeline,
    Auto,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::Single => "single",
            Mode::Parallel => "parallel",
            Mode::Pipeline => "pipeline",
            Mode::Auto => "auto",
        };
        f.write_str(name)
    }
}

impl FromStr for Mode {
    type Err = OrchestratorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "single" => Ok(Mode::Single),
            "parallel" => Ok(Mode::Parallel),
            "pipeline" => Ok(Mode::Pipeline),
            "auto" => Ok(Mode::Auto),
            other => Err(OrchestratorError::InvalidRequest(format!(
                "unknown mode '{other}' (supported: single, parallel, pipeline, auto)"
            ))),
        }
    }
}

/// A request to the orchestrator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrchestratorRequest {
    pub mode: Mode,
    pub input: String,
    /// Roles to invoke, for single/parallel modes
    #[serde(default)]
    pub roles: Vec<AgentRole>,
    /// Pipeline name, for pipeline mode
    #[serde(default)]
    pub pipeline: Option<String>,
}

/// The orchestrator's response
#[derive(Debug, Clone, Serialize)]
pub struct OrchestratorResponse {
    /// Mode actually executed (`auto` resolves to one of the other three)
    pub mode: Mode,
    pub results: Vec<AgentResult>,
    /// Present when the executed mode was pipeline
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pipeline: Option<PipelineResult>,
}

/// Validated execution plan; produced before any outbound call
enum Plan {
    Single(AgentRole),
    Parallel(Vec<AgentRole>),
    Pipeline(String),
}

/// Single entry point coordinating registry, dispatcher, and runner
pub struct Orchestrator {
    registry: AgentRegistry,
    catalog: PipelineCatalog,
    invoker: AgentInvoker,
    dispatcher: ParallelDispatcher,
    runner: PipelineRunner,
}

impl Orchestrator {
    pub fn new(registry: AgentRegistry, catalog: PipelineCatalog, invoker: AgentInvoker) -> Self {
        Self {
            registry,
            catalog,
            dispatcher: ParallelDispatcher::new(invoker.clone()),
            runner: PipelineRunner::new(invoker.clone()),
            invoker,
        }
    }

    /// Build an orchestrator from configuration and a model-call client
    ///
    /// Fails with a configuration error if any agent's required setup is
    /// missing; nothing is deferred to request time.
    pub fn from_config(
        config: &Config,
        client: Arc<dyn ModelClient>,
    ) -> Result<Self, OrchestratorError> {
        let registry = AgentRegistry::from_config(config)?;
        let invoker = AgentInvoker::new(client).with_max_tokens(config.llm.max_tokens);
        Ok(Self::new(registry, PipelineCatalog::builtin(), invoker))
    }

    pub fn registry(&self) -> &AgentRegistry {
        &self.registry
    }

    pub fn catalog(&self) -> &PipelineCatalog {
        &self.catalog
    }

    /// Resolve `auto` mode from the request's populated fields
    ///
    /// Part of the observable contract, not an implementation detail:
    /// a pipeline name wins over everything; two or more roles mean
    /// parallel; anything else is single.
    pub fn resolve_auto(request: &OrchestratorRequest) -> Mode {
        if request.pipeline.is_some() {
            Mode::Pipeline
        } else if request.roles.len() > 1 {
            Mode::Parallel
        } else {
            Mode::Single
        }
    }

    /// Validate the request into an execution plan
    ///
    /// Every validation failure (missing roles, unknown pipeline) surfaces
    /// here, before any invocation is attempted.
    fn plan(&self, request: &OrchestratorRequest) -> Result<Plan, OrchestratorError> {
        let auto = request.mode == Mode::Auto;
        let mode = if auto {
            let resolved = Self::resolve_auto(request);
            tracing::debug!(resolved = %resolved, "auto mode resolved");
            resolved
        } else {
            request.mode
        };

        match mode {
            Mode::Single => match request.roles.as_slice() {
                [role] => Ok(Plan::Single(*role)),
                [] if auto => Ok(Plan::Single(DEFAULT_ROLE)),
                [] => Err(OrchestratorError::InvalidRequest(
                    "single mode requires exactly one role, got none".to_string(),
                )),
                many => Err(OrchestratorError::InvalidRequest(format!(
                    "single mode requires exactly one role, got {}",
                    many.len()
                ))),
            },
            Mode::Parallel => {
                if request.roles.is_empty() {
                    return Err(OrchestratorError::InvalidRequest(
                        "parallel mode requires at least one role".to_string(),
                    ));
                }
                Ok(Plan::Parallel(request.roles.clone()))
            }
            Mode::Pipeline => {
                let name = request.pipeline.as_deref().ok_or_else(|| {
                    OrchestratorError::InvalidRequest(
                        "pipeline mode requires a pipeline name".to_string(),
                    )
                })?;
                // Resolve now so an unknown name fails before any call.
                self.catalog.get(name)?;
                Ok(Plan::Pipeline(name.to_string()))
            }
            Mode::Auto => unreachable!("auto resolves to a concrete mode"),
        }
    }

    /// Execute a request under its (possibly auto-resolved) mode
    pub async fn run(
        &self,
        request: &OrchestratorRequest,
    ) -> Result<OrchestratorResponse, OrchestratorError> {
        match self.plan(request)? {
            Plan::Single(role) => {
                let result = self
                    .invoker
                    .invoke(self.registry.get(role), &request.input)
                    .await?;
                Ok(OrchestratorResponse {
                    mode: Mode::Single,
                    results: vec![result],
                    pipeline: None,
                })
            }
            Plan::Parallel(roles) => {
                let agents: Vec<AgentConfig> = roles
                    .iter()
                    .map(|role| self.registry.get(*role).clone())
                    .collect();
                let results = self.dispatcher.dispatch_all(&agents, &request.input).await?;
                Ok(OrchestratorResponse {
                    mode: Mode::Parallel,
                    results,
                    pipeline: None,
                })
            }
            Plan::Pipeline(name) => {
                let pipeline = self.catalog.get(&name)?;
                match self.runner.run(pipeline, &request.input, &self.registry).await {
                    Ok(result) => Ok(OrchestratorResponse {
                        mode: Mode::Pipeline,
                        results: result.steps.clone(),
                        pipeline: Some(result),
                    }),
                    Err(failure) => {
                        tracing::warn!(
                            pipeline = %failure.pipeline,
                            failed_step = failure.failed_step,
                            completed_steps = failure.trace.len(),
                            "pipeline aborted"
                        );
                        Err(failure.source)
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(mode: Mode, roles: &[AgentRole], pipeline: Option<&str>) -> OrchestratorRequest {
        OrchestratorRequest {
            mode,
            input: "x".to_string(),
            roles: roles.to_vec(),
            pipeline: pipeline.map(str::to_string),
        }
    }

    #[test]
    fn auto_prefers_pipeline_over_roles() {
        let req = request(
            Mode::Auto,
            &[AgentRole::CodeWriter, AgentRole::CodeReviewer],
            Some("review-chain"),
        );
        assert_eq!(Orchestrator::resolve_auto(&req), Mode::Pipeline);
    }

    #[test]
    fn auto_picks_parallel_for_multiple_roles() {
        let req = request(
            Mode::Auto,
            &[AgentRole::SecurityAuditor, AgentRole::TestingAgent],
            None,
        );
        assert_eq!(Orchestrator::resolve_auto(&req), Mode::Parallel);
    }

    #[test]
    fn auto_falls_back_to_single() {
        assert_eq!(
            Orchestrator::resolve_auto(&request(Mode::Auto, &[AgentRole::CodeWriter], None)),
            Mode::Single
        );
        assert_eq!(
            Orchestrator::resolve_auto(&request(Mode::Auto, &[], None)),
            Mode::Single
        );
    }

    #[test]
    fn mode_parses_and_displays() {
        for mode in [Mode::Single, Mode::Parallel, Mode::Pipeline, Mode::Auto] {
            assert_eq!(mode.to_string().parse::<Mode>().unwrap(), mode);
        }
        assert!("consensus".parse::<Mode>().is_err());
    }

    #[test]
    fn request_deserializes_with_defaults() {
        let req: OrchestratorRequest =
            serde_json::from_str(r#"{"mode":"auto","input":"hello"}"#).unwrap();
        assert_eq!(req.mode, Mode::Auto);
        assert!(req.roles.is_empty());
        assert!(req.pipeline.is_none());
    }
}
