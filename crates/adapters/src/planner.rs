// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Planner contract (§6): turns a goal and a memory snapshot into a Task
//! Graph. Prompt content and model choice are out of scope; only the
//! produced graph matters to the core.

use ajr_core::TaskGraph;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("planner unavailable: {0}")]
    Unavailable(String),
    #[error("goal rejected: {0}")]
    GoalRejected(String),
}

#[async_trait]
pub trait Planner: Send + Sync {
    async fn plan(&self, goal: &str, memory: &serde_json::Value) -> Result<TaskGraph, PlannerError>;
}

/// Builds a fixed single-node graph: a lone LLM call directly from `start`
/// to `end`. Useful as a default for goals that don't need multi-step
/// planning, and as the planner used in tests that don't exercise planning
/// itself.
pub struct FixedSingleNodePlanner;

#[async_trait]
impl Planner for FixedSingleNodePlanner {
    async fn plan(&self, goal: &str, _memory: &serde_json::Value) -> Result<TaskGraph, PlannerError> {
        use ajr_core::{Node, NodeId, NodeKind};

        let respond = NodeId::new("respond");
        let node = Node::new(respond.clone(), NodeKind::Llm, serde_json::json!({ "goal": goal }));
        TaskGraph::new(vec![node], vec![], respond.clone(), respond)
            .map_err(|e| PlannerError::GoalRejected(e.to_string()))
    }
}

#[cfg(test)]
#[path = "planner_tests.rs"]
mod tests;
