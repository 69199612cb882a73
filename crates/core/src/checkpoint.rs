// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-job checkpoint: the durable record of completed nodes and their
//! outputs (§3, §4.4). Written after each successful `node_finished`, and is
//! the only persisted state the Step Executor needs to resume a crashed job.

use crate::ids::{JobId, NodeId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Checkpoint {
    pub job_id: JobId,
    pub cursor_node_id: Option<NodeId>,
    pub node_outputs: BTreeMap<NodeId, serde_json::Value>,
    pub updated_at_ms: u64,
}

impl Checkpoint {
    pub fn new(job_id: JobId) -> Self {
        Self { job_id, cursor_node_id: None, node_outputs: BTreeMap::new(), updated_at_ms: 0 }
    }

    /// Record a node's output and advance the cursor. Idempotent: recording
    /// the same node twice with the same output just updates `updated_at_ms`.
    pub fn advance(&mut self, node_id: NodeId, output: serde_json::Value, epoch_ms: u64) {
        self.node_outputs.insert(node_id.clone(), output);
        self.cursor_node_id = Some(node_id);
        self.updated_at_ms = epoch_ms;
    }

    pub fn output_for(&self, node_id: &NodeId) -> Option<&serde_json::Value> {
        self.node_outputs.get(node_id)
    }
}

#[cfg(test)]
#[path = "checkpoint_tests.rs"]
mod tests;
