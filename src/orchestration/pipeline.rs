//! Sequential agent pipelines: definitions, catalog, and runner

use crate::agents::{AgentInvoker, AgentRegistry, AgentResult, AgentRole};
use crate::error::OrchestratorError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A pure function mapping (previous step output, original input) to the
/// next step's input
pub type TransformFn = fn(previous: &str, original: &str) -> String;

/// Named transforms resolvable from pipeline definitions
///
/// Definitions stay serializable because they reference transforms by id
/// rather than embedding closures.
const TRANSFORMS: &[(&str, TransformFn)] = &[
    ("with-original-request", with_original_request),
    ("review-request", review_request),
];

fn with_original_request(previous: &str, original: &str) -> String {
    format!("{previous}\n\nOriginal request:\n{original}")
}

fn review_request(previous: &str, _original: &str) -> String {
    format!("Review the following work and report any problems:\n\n{previous}")
}

/// How a pipeline step derives its input from the previous step's output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Transform {
    /// Pass the previous output through verbatim
    Identity,
    /// Apply a transform from the named-transform registry
    Named(String),
}

impl Transform {
    /// Apply this transform to (previous output, original input)
    ///
    /// An unresolvable name is a configuration error: the pipeline
    /// definition references a transform that does not exist.
    pub fn apply(&self, previous: &str, original: &str) -> Result<String, OrchestratorError> {
        match self {
            Transform::Identity => Ok(previous.to_string()),
            Transform::Named(id) => {
                let transform = TRANSFORMS
                    .iter()
                    .find(|(name, _)| name == id)
                    .map(|(_, f)| f)
                    .ok_or_else(|| {
                        OrchestratorError::Configuration(format!("unknown transform '{id}'"))
                    })?;
                Ok(transform(previous, original))
            }
        }
    }
}

/// One step of a pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineStep {
    pub role: AgentRole,
    pub transform: Transform,
}

impl PipelineStep {
    pub fn new(role: AgentRole) -> Self {
        Self {
            role,
            transform: Transform::Identity,
        }
    }

    pub fn with_transform(role: AgentRole, transform_id: &str) -> Self {
        Self {
            role,
            transform: Transform::Named(transform_id.to_string()),
        }
    }
}

/// A named, ordered sequence of agent steps
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub name: String,
    pub description: String,
    pub steps: Vec<PipelineStep>,
}

/// Publishable pipeline metadata for catalog discovery
#[derive(Debug, Clone, Serialize)]
pub struct PipelineMeta {
    pub name: String,
    pub description: String,
}

/// Trace and final output of a completed pipeline run
#[derive(Debug, Clone, Serialize)]
pub struct PipelineResult {
    pub pipeline: String,
    /// One entry per step, in execution order
    pub steps: Vec<AgentResult>,
    /// Content of the last step's result
    pub final_output: String,
}

/// A pipeline run that aborted mid-flight
///
/// Unlike the parallel dispatcher, a failed pipeline keeps its partial
/// trace: the completed steps are causally upstream of the failure and have
/// diagnostic value.
#[derive(Debug, Error)]
#[error("pipeline '{pipeline}' failed at step {failed_step} ({role}): {source}")]
pub struct PipelineError {
    pub pipeline: String,
    /// Zero-based index of the step that failed
    pub failed_step: usize,
    pub role: AgentRole,
    /// Results of the steps that completed before the failure
    pub trace: Vec<AgentResult>,
    #[source]
    pub source: OrchestratorError,
}

/// Static catalog of named pipelines
pub struct PipelineCatalog {
    pipelines: Vec<PipelineConfig>,
}

impl PipelineCatalog {
    /// The built-in pipeline set
    pub fn builtin() -> Self {
        Self {
            pipelines: vec![
                PipelineConfig {
                    name: "review-chain".to_string(),
                    description: "Write code, then review it".to_string(),
                    steps: vec![
                        PipelineStep::new(AgentRole::CodeWriter),
                        PipelineStep::with_transform(AgentRole::CodeReviewer, "review-request"),
                    ],
                },
                PipelineConfig {
                    name: "secure-delivery".to_string(),
                    description: "Write code, audit it for security issues, then write tests"
                        .to_string(),
                    steps: vec![
                        PipelineStep::new(AgentRole::CodeWriter),
                        PipelineStep::new(AgentRole::SecurityAuditor),
                        PipelineStep::with_transform(
                            AgentRole::TestingAgent,
                            "with-original-request",
                        ),
                    ],
                },
                PipelineConfig {
                    name: "schema-review".to_string(),
                    description: "Design a database schema, then review it against the request"
                        .to_string(),
                    steps: vec![
                        PipelineStep::new(AgentRole::DatabaseAgent),
                        PipelineStep::with_transform(
                            AgentRole::CodeReviewer,
                            "with-original-request",
                        ),
                    ],
                },
            ],
        }
    }

    /// Look up a pipeline by name
    pub fn get(&self, name: &str) -> Result<&PipelineConfig, OrchestratorError> {
        self.pipelines
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| OrchestratorError::NotFound(name.to_string()))
    }

    /// Name and description of every pipeline, in catalog order
    pub fn list(&self) -> Vec<PipelineMeta> {
        self.pipelines
            .iter()
            .map(|p| PipelineMeta {
                name: p.name.clone(),
                description: p.description.clone(),
            })
            .collect()
    }
}

/// Executes pipelines strictly in step order
pub struct PipelineRunner {
    invoker: AgentInvoker,
}

impl PipelineRunner {
    pub fn new(invoker: AgentInvoker) -> Self {
        Self { invoker }
    }

    /// Run a pipeline against the original input
    ///
    /// Step 0 receives the original input verbatim; step i>0 receives its
    /// transform applied to (previous output, original input). A step
    /// failure aborts the run immediately, surfacing the error together
    /// with the trace accumulated so far.
    pub async fn run(
        &self,
        pipeline: &PipelineConfig,
        original_input: &str,
        registry: &AgentRegistry,
    ) -> Result<PipelineResult, PipelineError> {
        let mut trace: Vec<AgentResult> = Vec::with_capacity(pipeline.steps.len());
        let mut previous = String::new();

        for (index, step) in pipeline.steps.iter().enumerate() {
            let fail = |trace: Vec<AgentResult>, source| PipelineError {
                pipeline: pipeline.name.clone(),
                failed_step: index,
                role: step.role,
                trace,
                source,
            };

            let message = if index == 0 {
                original_input.to_string()
            } else {
                match step.transform.apply(&previous, original_input) {
                    Ok(message) => message,
                    Err(source) => return Err(fail(trace, source)),
                }
            };

            tracing::debug!(
                pipeline = %pipeline.name,
                step = index,
                role = %step.role,
                "running pipeline step"
            );

            match self.invoker.invoke(registry.get(step.role), &message).await {
                Ok(result) => {
                    previous = result.content.clone();
                    trace.push(result);
                }
                Err(source) => return Err(fail(trace, source)),
            }
        }

        Ok(PipelineResult {
            pipeline: pipeline.name.clone(),
            final_output: previous,
            steps: trace,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_passes_previous_output_verbatim() {
        let out = Transform::Identity.apply("prev", "orig").unwrap();
        assert_eq!(out, "prev");
    }

    #[test]
    fn named_transform_receives_previous_and_original() {
        let out = Transform::Named("with-original-request".to_string())
            .apply("schema v1", "design a ledger schema")
            .unwrap();
        assert!(out.starts_with("schema v1"));
        assert!(out.contains("design a ledger schema"));
    }

    #[test]
    fn unknown_transform_is_a_configuration_error() {
        let err = Transform::Named("sparkle".to_string())
            .apply("a", "b")
            .unwrap_err();
        assert_eq!(err.kind(), "configuration");
        assert!(err.to_string().contains("sparkle"));
    }

    #[test]
    fn builtin_transform_names_all_resolve() {
        for pipeline in PipelineCatalog::builtin().pipelines {
            for step in pipeline.steps {
                step.transform.apply("prev", "orig").unwrap();
            }
        }
    }

    #[test]
    fn catalog_lookup_hits_and_misses() {
        let catalog = PipelineCatalog::builtin();
        assert_eq!(catalog.get("review-chain").unwrap().steps.len(), 2);

        let err = catalog.get("deploy-chain").unwrap_err();
        assert_eq!(err.kind(), "not_found");
        assert!(err.to_string().contains("deploy-chain"));
    }

    #[test]
    fn catalog_list_matches_definitions() {
        let catalog = PipelineCatalog::builtin();
        let names: Vec<_> = catalog.list().into_iter().map(|m| m.name).collect();
        assert_eq!(names, ["review-chain", "secure-delivery", "schema-review"]);
    }
}
