//! Execution strategies: parallel fan-out, sequential pipelines, and the
//! orchestrator that resolves between them

mod dispatcher;
mod orchestrator;
mod pipeline;

pub use dispatcher::ParallelDispatcher;
pub use orchestrator::{
    Mode, Orchestrator, OrchestratorRequest, OrchestratorResponse, DEFAULT_ROLE,
};
pub use pipeline::{
    PipelineCatalog, PipelineConfig, PipelineError, PipelineMeta, PipelineResult, PipelineRunner,
    PipelineStep, Transform,
};
