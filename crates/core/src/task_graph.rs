// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Task Graph: a Planner-produced DAG of typed nodes (§3, §4.3).

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, BTreeSet, VecDeque};

use crate::ids::NodeId;

/// What kind of work a node performs. Dispatch target for the Step Executor's
/// node adapters (§4.4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Llm,
    Tool,
    Workflow,
}

crate::simple_display! {
    NodeKind {
        Llm => "llm",
        Tool => "tool",
        Workflow => "workflow",
    }
}

/// A single node in a Task Graph. `config` is an opaque JSON object
/// interpreted only by the matching node adapter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub kind: NodeKind,
    #[serde(default)]
    pub config: serde_json::Value,
}

impl Node {
    pub fn new(id: impl Into<NodeId>, kind: NodeKind, config: serde_json::Value) -> Self {
        Self { id: id.into(), kind, config }
    }
}

/// A Planner-produced DAG of typed nodes representing how a goal is to be
/// fulfilled.
///
/// Nodes are keyed in a `BTreeMap`, which is `serde_json`'s default map
/// representation (sorted by key) as long as the `preserve_order` feature of
/// `serde_json` stays disabled. That gives canonical, deterministic
/// serialization for free: the same graph always serializes to the same
/// bytes, which is what [`TaskGraph::content_hash`] relies on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskGraph {
    pub nodes: BTreeMap<NodeId, Node>,
    pub edges: Vec<(NodeId, NodeId)>,
    pub start: NodeId,
    pub end: NodeId,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TaskGraphError {
    #[error("duplicate node id: {0}")]
    DuplicateNodeId(NodeId),
    #[error("start node {0} not present in graph")]
    MissingStart(NodeId),
    #[error("end node {0} not present in graph")]
    MissingEnd(NodeId),
    #[error("edge references unknown node: {0}")]
    UnknownEdgeEndpoint(NodeId),
    #[error("graph contains a cycle")]
    Cycle,
    #[error("node {0} is unreachable from start")]
    Unreachable(NodeId),
}

impl TaskGraph {
    /// Build a graph from a node list and edge list, validating the DAG
    /// invariants described in §3: unique ids, well-formed start/end, no
    /// cycles, and every node reachable from `start`.
    pub fn new(
        nodes: Vec<Node>,
        edges: Vec<(NodeId, NodeId)>,
        start: NodeId,
        end: NodeId,
    ) -> Result<Self, TaskGraphError> {
        let mut map = BTreeMap::new();
        for node in nodes {
            if map.insert(node.id.clone(), node.clone()).is_some() {
                return Err(TaskGraphError::DuplicateNodeId(node.id));
            }
        }
        if !map.contains_key(&start) {
            return Err(TaskGraphError::MissingStart(start));
        }
        if !map.contains_key(&end) {
            return Err(TaskGraphError::MissingEnd(end));
        }
        for (from, to) in &edges {
            if !map.contains_key(from) {
                return Err(TaskGraphError::UnknownEdgeEndpoint(from.clone()));
            }
            if !map.contains_key(to) {
                return Err(TaskGraphError::UnknownEdgeEndpoint(to.clone()));
            }
        }

        let graph = Self { nodes: map, edges, start, end };
        let order = graph.topological_order()?;
        graph.assert_reachable(&order)?;
        Ok(graph)
    }

    /// Compute a topological order, stable under canonical serialization:
    /// among nodes with no remaining incoming edges, the lexicographically
    /// smallest node id is always picked next (§4.4).
    pub fn topological_order(&self) -> Result<Vec<NodeId>, TaskGraphError> {
        let mut indegree: BTreeMap<NodeId, usize> =
            self.nodes.keys().map(|id| (id.clone(), 0)).collect();
        for (_, to) in &self.edges {
            *indegree.get_mut(to).expect("validated edge endpoint") += 1;
        }

        let mut ready: BTreeSet<NodeId> =
            indegree.iter().filter(|(_, &d)| d == 0).map(|(id, _)| id.clone()).collect();
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut remaining = indegree;

        while let Some(next) = ready.iter().next().cloned() {
            ready.remove(&next);
            order.push(next.clone());
            for (from, to) in &self.edges {
                if from == &next {
                    let d = remaining.get_mut(to).expect("validated edge endpoint");
                    *d -= 1;
                    if *d == 0 {
                        ready.insert(to.clone());
                    }
                }
            }
        }

        if order.len() != self.nodes.len() {
            return Err(TaskGraphError::Cycle);
        }
        Ok(order)
    }

    fn assert_reachable(&self, order: &[NodeId]) -> Result<(), TaskGraphError> {
        let mut reachable: BTreeSet<NodeId> = BTreeSet::new();
        reachable.insert(self.start.clone());
        let mut queue = VecDeque::from([self.start.clone()]);
        while let Some(id) = queue.pop_front() {
            for (from, to) in &self.edges {
                if from == &id && reachable.insert(to.clone()) {
                    queue.push_back(to.clone());
                }
            }
        }
        for id in order {
            if !reachable.contains(id) {
                return Err(TaskGraphError::Unreachable(id.clone()));
            }
        }
        Ok(())
    }

    /// Nodes strictly after `cursor`, in topological order. `cursor = None`
    /// means no node has completed yet, so the whole order is returned.
    pub fn nodes_after(&self, cursor: Option<&NodeId>) -> Result<Vec<NodeId>, TaskGraphError> {
        let order = self.topological_order()?;
        match cursor {
            None => Ok(order),
            Some(cursor) => {
                let pos = order.iter().position(|id| id == cursor);
                match pos {
                    Some(i) => Ok(order[i + 1..].to_vec()),
                    None => Ok(order),
                }
            }
        }
    }

    /// Canonical JSON bytes of this graph, used as the input to
    /// [`TaskGraph::content_hash`] and persisted verbatim in `plan_generated`.
    pub fn canonical_json(&self) -> String {
        serde_json::to_string(self).expect("TaskGraph serializes infallibly")
    }

    /// SHA-256 hex digest of the canonical serialization. Two graphs that
    /// are structurally identical always hash identically (round-trip
    /// invariant in §8).
    pub fn content_hash(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.canonical_json().as_bytes());
        format!("{:x}", hasher.finalize())
    }
}

#[cfg(test)]
#[path = "task_graph_tests.rs"]
mod tests;
