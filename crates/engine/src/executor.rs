// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Step Executor (§4.4): compiles the Task Graph, executes nodes in
//! topological order, records node-start/finish events, persists
//! checkpoints (via the Event Store's projection), and supports replay.

use ajr_adapters::{ChatModel, ChatModelError, Planner, PlannerError, Tool, ToolContext, ToolError, ToolRegistry, WorkflowError, WorkflowRegistry};
use ajr_core::{
    AttemptId, Checkpoint, Clock, CorrelationKey, Event, JobId, Node, NodeId, NodeKind, StoreError,
    TaskGraph, WaitRecord, WaitType,
};
use ajr_storage::EventStore;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum ExecutorError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Planner(#[from] PlannerError),
}

/// How a single `run` call ended. The Worker loop maps this to the terminal
/// event it appends (§4.5) — except `Waiting`, which was already appended
/// by the executor itself before parking.
#[derive(Debug, Clone)]
pub enum Outcome {
    Completed { output: serde_json::Value },
    Failed { reason: String, retryable: bool },
    Cancelled,
    Waiting,
}

/// Drives one job's Task Graph to completion, suspension, or failure.
/// Generic over the pluggable contracts in §6 so the core stays
/// transport- and model-agnostic.
pub struct StepExecutor<P, M, T, W, C> {
    store: Arc<dyn EventStore>,
    planner: P,
    chat_model: M,
    tools: T,
    workflows: W,
    clock: C,
    graphs: Mutex<HashMap<JobId, TaskGraph>>,
}

impl<P, M, T, W, C> StepExecutor<P, M, T, W, C>
where
    P: Planner,
    M: ChatModel,
    T: ToolRegistry,
    W: WorkflowRegistry,
    C: Clock,
{
    pub fn new(store: Arc<dyn EventStore>, planner: P, chat_model: M, tools: T, workflows: W, clock: C) -> Self {
        Self { store, planner, chat_model, tools, workflows, clock, graphs: Mutex::new(HashMap::new()) }
    }

    /// Ensure a plan exists for `job_id`, planning and recording
    /// `plan_generated` on first use. Returns the graph and the version the
    /// next append should use as `expected_version`.
    async fn ensure_plan(
        &self,
        job_id: JobId,
        goal: &str,
        attempt_id: AttemptId,
        mut version: u64,
    ) -> Result<(TaskGraph, u64), ExecutorError> {
        if let Some(graph) = self.graphs.lock().get(&job_id).cloned() {
            return Ok((graph, version));
        }
        let graph = self.planner.plan(goal, &serde_json::json!({})).await?;
        version = self
            .store
            .append(
                job_id,
                version,
                Event::PlanGenerated { graph_hash: graph.content_hash() },
                attempt_id,
                self.clock.epoch_ms(),
            )
            .await?;
        self.graphs.lock().insert(job_id, graph.clone());
        Ok((graph, version))
    }

    /// Execute nodes after `checkpoint.cursor_node_id` in topological order
    /// until the graph is exhausted, a node parks the job, a node fails, or
    /// `cancel` fires. `version` is the job's current event version.
    pub async fn run(
        &self,
        job_id: JobId,
        goal: &str,
        attempt_id: AttemptId,
        version: u64,
        checkpoint: &Checkpoint,
        cancel: &CancellationToken,
    ) -> Result<Outcome, ExecutorError> {
        let (graph, mut version) = self.ensure_plan(job_id, goal, attempt_id, version).await?;

        let mut cursor = checkpoint.cursor_node_id.clone();
        let mut last_output = cursor
            .as_ref()
            .and_then(|id| checkpoint.output_for(id))
            .cloned()
            .unwrap_or(serde_json::Value::Null);

        // A job resumed from a wait never received `node_started`/`node_finished`
        // for the node that parked it, so the checkpoint cursor still points at
        // its predecessor. Close that node out here, once, before computing what
        // runs next - otherwise `nodes_after` hands back the same wait node and
        // it parks again forever.
        if let Some((node_id, output)) = self.resumed_wait_node(job_id).await? {
            if cursor.as_ref() != Some(&node_id) {
                version = self
                    .store
                    .append(
                        job_id,
                        version,
                        Event::NodeFinished { node_id: node_id.clone(), output: output.clone() },
                        attempt_id,
                        self.clock.epoch_ms(),
                    )
                    .await?;
                last_output = output;
                cursor = Some(node_id);
            }
        }

        let remaining = graph
            .nodes_after(cursor.as_ref())
            .map_err(|e| ExecutorError::Planner(PlannerError::GoalRejected(e.to_string())))?;

        for node_id in remaining {
            if cancel.is_cancelled() {
                return Ok(Outcome::Cancelled);
            }
            let node = graph.nodes.get(&node_id).expect("node id came from this graph's own order");

            if let Some(wait) = parse_wait_directive(node) {
                self.store
                    .append(job_id, version, Event::JobWaiting { wait }, attempt_id, self.clock.epoch_ms())
                    .await?;
                return Ok(Outcome::Waiting);
            }

            version = self
                .store
                .append(
                    job_id,
                    version,
                    Event::NodeStarted { node_id: node_id.clone(), kind: node.kind },
                    attempt_id,
                    self.clock.epoch_ms(),
                )
                .await?;

            match self.execute_node(node, cancel).await {
                Ok(output) => {
                    last_output = output.clone();
                    version = self
                        .store
                        .append(
                            job_id,
                            version,
                            Event::NodeFinished { node_id: node_id.clone(), output },
                            attempt_id,
                            self.clock.epoch_ms(),
                        )
                        .await?;
                }
                Err(NodeError::Cancelled) => return Ok(Outcome::Cancelled),
                Err(NodeError::Failed { reason, retryable }) => {
                    warn!(job_id = %job_id, node_id = %node_id, reason = %reason, "node execution failed");
                    return Ok(Outcome::Failed { reason, retryable });
                }
            }
        }

        info!(job_id = %job_id, "task graph exhausted");
        Ok(Outcome::Completed { output: last_output })
    }

    /// If the job's most recent `job_resumed` event followed a `job_waiting`,
    /// returns the node that parked it and the payload to close it out with.
    /// Returns `None` once that node has already been closed (the checkpoint
    /// cursor will then already equal its id).
    async fn resumed_wait_node(&self, job_id: JobId) -> Result<Option<(NodeId, serde_json::Value)>, ExecutorError> {
        let (events, _) = self.store.list_events(job_id).await?;
        let Some((resumed_at, payload)) = events.iter().enumerate().rev().find_map(|(i, r)| match &r.event {
            Event::JobResumed { signal_payload } => Some((i, signal_payload.clone())),
            _ => None,
        }) else {
            return Ok(None);
        };
        let node_id = events[..resumed_at].iter().rev().find_map(|r| match &r.event {
            Event::JobWaiting { wait } => Some(wait.node_id.clone()),
            _ => None,
        });
        Ok(node_id.map(|id| (id, payload.unwrap_or(serde_json::Value::Null))))
    }

    async fn execute_node(&self, node: &Node, cancel: &CancellationToken) -> Result<serde_json::Value, NodeError> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(NodeError::Cancelled),
            result = self.dispatch(node) => result,
        }
    }

    async fn dispatch(&self, node: &Node) -> Result<serde_json::Value, NodeError> {
        match node.kind {
            NodeKind::Llm => self
                .chat_model
                .invoke(node.config.clone(), None)
                .await
                .map_err(NodeError::from),
            NodeKind::Tool => {
                let tool_name = node
                    .config
                    .get("tool")
                    .and_then(|v| v.as_str())
                    .ok_or_else(|| NodeError::Failed { reason: "missing 'tool' field".into(), retryable: false })?;
                let tool: Arc<dyn Tool> = self
                    .tools
                    .get(tool_name)
                    .ok_or_else(|| NodeError::Failed { reason: format!("unknown tool '{tool_name}'"), retryable: false })?;
                let args = node.config.get("args").cloned().unwrap_or(serde_json::json!({}));
                tool.invoke(&ToolContext::default(), args).await.map_err(NodeError::from)
            }
            NodeKind::Workflow => {
                let workflow_name = node
                    .config
                    .get("workflow")
                    .and_then(|v| v.as_str())
                    .ok_or_else(|| NodeError::Failed { reason: "missing 'workflow' field".into(), retryable: false })?;
                let params = node.config.get("params").cloned().unwrap_or(serde_json::json!({}));
                self.workflows.execute(workflow_name, params).await.map_err(NodeError::from)
            }
        }
    }
}

/// A node whose config carries a `wait` object is a suspension point rather
/// than something to execute: `{"wait": {"correlation_key": "...",
/// "wait_type": "signal"|"message"|"timer", "deadline_ms"?: number}}`.
fn parse_wait_directive(node: &Node) -> Option<WaitRecord> {
    let wait = node.config.get("wait")?;
    let correlation_key = CorrelationKey::new(wait.get("correlation_key")?.as_str()?);
    let wait_type = match wait.get("wait_type")?.as_str()? {
        "signal" => WaitType::Signal,
        "message" => WaitType::Message,
        "timer" => WaitType::Timer,
        _ => return None,
    };
    let mut record = WaitRecord::new(node.id.clone(), correlation_key, wait_type);
    if let Some(deadline) = wait.get("deadline_ms").and_then(|v| v.as_u64()) {
        record = record.with_deadline(deadline);
    }
    Some(record)
}

enum NodeError {
    Cancelled,
    Failed { reason: String, retryable: bool },
}

impl From<ChatModelError> for NodeError {
    fn from(err: ChatModelError) -> Self {
        match err {
            ChatModelError::Canceled => NodeError::Cancelled,
            ChatModelError::RateLimited => NodeError::Failed { reason: "rate_limited".into(), retryable: true },
            ChatModelError::ProviderError(msg) => NodeError::Failed { reason: msg, retryable: true },
        }
    }
}

impl From<ToolError> for NodeError {
    fn from(err: ToolError) -> Self {
        match err {
            ToolError::Canceled => NodeError::Cancelled,
            ToolError::InvalidArgs(msg) => NodeError::Failed { reason: msg, retryable: false },
            ToolError::ToolFailed(msg) => NodeError::Failed { reason: msg, retryable: true },
        }
    }
}

impl From<WorkflowError> for NodeError {
    fn from(err: WorkflowError) -> Self {
        NodeError::Failed { reason: err.0, retryable: false }
    }
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;
