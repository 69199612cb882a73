// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The append-only event taxonomy (§3, §4.1). `EventRecord` is the envelope
//! persisted by the Event Store; `Event` is the tagged payload.

use crate::ids::{AttemptId, JobId, NodeId};
use crate::task_graph::NodeKind;
use crate::wait::WaitRecord;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum Event {
    JobCreated {
        goal: String,
    },
    JobRunning {
        worker_id: String,
    },
    PlanGenerated {
        graph_hash: String,
    },
    NodeStarted {
        node_id: NodeId,
        kind: NodeKind,
    },
    NodeFinished {
        node_id: NodeId,
        output: serde_json::Value,
    },
    ToolInvoked {
        node_id: NodeId,
        tool_name: String,
        args: serde_json::Value,
    },
    ToolReturned {
        node_id: NodeId,
        tool_name: String,
        result: serde_json::Value,
    },
    JobWaiting {
        wait: WaitRecord,
    },
    JobResumed {
        signal_payload: Option<serde_json::Value>,
    },
    JobCompleted {
        output: serde_json::Value,
    },
    JobFailed {
        reason: String,
        retryable: bool,
    },
    JobCancelled,
}

impl Event {
    /// The literal event type name, per §3's enumerated taxonomy. Kept
    /// independent of serde's tag so log output doesn't depend on the wire
    /// representation.
    pub fn type_name(&self) -> &'static str {
        match self {
            Event::JobCreated { .. } => "job_created",
            Event::JobRunning { .. } => "job_running",
            Event::PlanGenerated { .. } => "plan_generated",
            Event::NodeStarted { .. } => "node_started",
            Event::NodeFinished { .. } => "node_finished",
            Event::ToolInvoked { .. } => "tool_invoked",
            Event::ToolReturned { .. } => "tool_returned",
            Event::JobWaiting { .. } => "job_waiting",
            Event::JobResumed { .. } => "job_resumed",
            Event::JobCompleted { .. } => "job_completed",
            Event::JobFailed { .. } => "job_failed",
            Event::JobCancelled => "job_cancelled",
        }
    }

    /// §5(iv): the last event of the attempt that produced it - it always
    /// clears the job's lease. For `JobFailed { retryable: true, .. }` this
    /// is not the job's last event overall: `claim` accepts such a job again
    /// (§4.1 Reclamation / §4.5 Retry) and a later attempt appends more.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Event::JobCompleted { .. } | Event::JobFailed { .. } | Event::JobCancelled)
    }

    /// Whether the job's latest event leaves it eligible for a fresh claim
    /// (§4.1 `claim`): freshly created, resumed from a wait, or a previously
    /// leased attempt whose lease has since expired (the latter is decided
    /// by the lease table, not by this function).
    pub fn is_claimable_terminal_event(&self) -> bool {
        matches!(self, Event::JobCreated { .. } | Event::JobResumed { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub job_id: JobId,
    pub version: u64,
    pub event: Event,
    pub attempt_id: AttemptId,
    pub timestamp_ms: u64,
}

impl EventRecord {
    pub fn new(job_id: JobId, version: u64, event: Event, attempt_id: AttemptId, timestamp_ms: u64) -> Self {
        Self { job_id, version, event, attempt_id, timestamp_ms }
    }

    pub fn type_name(&self) -> &'static str {
        self.event.type_name()
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
