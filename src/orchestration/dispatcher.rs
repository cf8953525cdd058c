//! Parallel fan-out: one message, many agents, joined results

use crate::agents::{AgentConfig, AgentInvoker, AgentResult};
use crate::error::OrchestratorError;

/// Fans a single user message out to several agents concurrently
pub struct ParallelDispatcher {
    invoker: AgentInvoker,
}

impl ParallelDispatcher {
    pub fn new(invoker: AgentInvoker) -> Self {
        Self { invoker }
    }

    /// Invoke every agent with the same message, concurrently
    ///
    /// Results come back in input order regardless of completion order, so
    /// callers can correlate them with the requested agents positionally.
    /// The batch is atomic: the first failure resolves the join, the
    /// remaining in-flight calls are dropped, and no partial results are
    /// returned. Duplicate roles are permitted and all execute.
    pub async fn dispatch_all(
        &self,
        agents: &[AgentConfig],
        user_message: &str,
    ) -> Result<Vec<AgentResult>, OrchestratorError> {
        tracing::debug!(count = agents.len(), "dispatching parallel batch");

        let invocations = agents
            .iter()
            .map(|agent| self.invoker.invoke(agent, user_message));

        futures::future::try_join_all(invocations).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::AgentRole;
    use crate::llm::{
        ContentBlock, ModelClient, ModelError, ModelRequest, ModelResponse, TokenUsage,
    };
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    /// Echoes the model name after a per-model artificial delay; models named
    /// "fail" error instead.
    struct SlowEcho {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ModelClient for SlowEcho {
        fn name(&self) -> &str {
            "slow-echo"
        }

        async fn call(&self, request: &ModelRequest) -> Result<ModelResponse, ModelError> {
            self.calls.fetch_add(1, Ordering::SeqCst);

            let delay_ms: u64 = request
                .model
                .rsplit_once('-')
                .and_then(|(_, ms)| ms.parse().ok())
                .unwrap_or(0);
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;

            if request.model.starts_with("fail") {
                return Err(ModelError::ServiceError("injected failure".to_string()));
            }

            Ok(ModelResponse {
                model: request.model.clone(),
                content: vec![ContentBlock::text(format!("echo:{}", request.model))],
                usage: TokenUsage::default(),
            })
        }
    }

    fn agent(role: AgentRole, model: &str) -> AgentConfig {
        AgentConfig {
            role,
            name: role.default_name().to_string(),
            model: model.to_string(),
            temperature: 0.2,
            instructions: "test".to_string(),
        }
    }

    #[tokio::test]
    async fn results_follow_input_order_not_completion_order() {
        let dispatcher = ParallelDispatcher::new(AgentInvoker::new(Arc::new(SlowEcho {
            calls: AtomicUsize::new(0),
        })));

        // First agent finishes last, last agent finishes first.
        let agents = vec![
            agent(AgentRole::SecurityAuditor, "m-60"),
            agent(AgentRole::TestingAgent, "m-30"),
            agent(AgentRole::CodeReviewer, "m-0"),
        ];

        let results = dispatcher.dispatch_all(&agents, "x").await.unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].role, AgentRole::SecurityAuditor);
        assert_eq!(results[1].role, AgentRole::TestingAgent);
        assert_eq!(results[2].role, AgentRole::CodeReviewer);
    }

    #[tokio::test]
    async fn any_failure_aborts_the_whole_batch() {
        let dispatcher = ParallelDispatcher::new(AgentInvoker::new(Arc::new(SlowEcho {
            calls: AtomicUsize::new(0),
        })));

        let agents = vec![
            agent(AgentRole::CodeWriter, "m-0"),
            agent(AgentRole::CodeReviewer, "fail-0"),
            agent(AgentRole::TestingAgent, "m-50"),
        ];

        let err = dispatcher.dispatch_all(&agents, "x").await.unwrap_err();
        assert_eq!(err.kind(), "upstream");
    }

    #[tokio::test]
    async fn duplicate_roles_both_execute() {
        let client = Arc::new(SlowEcho {
            calls: AtomicUsize::new(0),
        });
        let dispatcher = ParallelDispatcher::new(AgentInvoker::new(client.clone()));

        let agents = vec![
            agent(AgentRole::CodeReviewer, "m-0"),
            agent(AgentRole::CodeReviewer, "m-10"),
        ];

        let results = dispatcher.dispatch_all(&agents, "x").await.unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(client.calls.load(Ordering::SeqCst), 2);
    }
}
