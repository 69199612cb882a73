// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job identity and the job status state machine.

use crate::clock::Clock;
use crate::ids::{JobId, NodeId, TenantId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Status of a job. See the module-level state machine in the design doc:
///
/// ```text
/// pending --claim--> running --node_finished*--> running
///                       |-- plan emits wait --> waiting --signal/timer--> pending (resumed)
///                       |-- all nodes ok --> completed (terminal)
///                       |-- non-retryable --> failed (terminal)
///                       |-- cancel_requested + cooperative stop --> cancelled (terminal)
///                       `-- lease expires + retry_count < max --> pending
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Pending,
    Running,
    Waiting,
    Completed,
    Failed,
    Cancelled,
}

impl JobStatus {
    /// Terminal states are absorbing: no event may follow them.
    pub fn is_terminal(self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed | JobStatus::Cancelled)
    }

    pub fn is_waiting(self) -> bool {
        matches!(self, JobStatus::Waiting)
    }
}

crate::simple_display! {
    JobStatus {
        Pending => "pending",
        Running => "running",
        Waiting => "waiting",
        Completed => "completed",
        Failed => "failed",
        Cancelled => "cancelled",
    }
}

/// Configuration for creating a new job via `submit`.
#[derive(Debug, Clone)]
pub struct JobConfig {
    pub id: JobId,
    pub tenant_id: TenantId,
    pub agent_id: String,
    pub goal: String,
    pub required_capabilities: BTreeSet<String>,
    pub queue: String,
}

impl JobConfig {
    pub fn builder(tenant_id: impl Into<TenantId>, agent_id: impl Into<String>, goal: impl Into<String>) -> JobConfigBuilder {
        JobConfigBuilder {
            id: JobId::new(),
            tenant_id: tenant_id.into(),
            agent_id: agent_id.into(),
            goal: goal.into(),
            required_capabilities: BTreeSet::new(),
            queue: String::new(),
        }
    }
}

pub struct JobConfigBuilder {
    id: JobId,
    tenant_id: TenantId,
    agent_id: String,
    goal: String,
    required_capabilities: BTreeSet<String>,
    queue: String,
}

impl JobConfigBuilder {
    crate::setters! {
        into {
            queue: String,
        }
        set {
            required_capabilities: BTreeSet<String>,
        }
    }

    pub fn build(self) -> JobConfig {
        JobConfig {
            id: self.id,
            tenant_id: self.tenant_id,
            agent_id: self.agent_id,
            goal: self.goal,
            required_capabilities: self.required_capabilities,
            queue: self.queue,
        }
    }
}

/// Current-state projection of a job (§4.2). Derived from the event log;
/// never mutated except by the worker currently holding the job's lease.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub tenant_id: TenantId,
    pub agent_id: String,
    pub goal: String,
    pub status: JobStatus,
    /// Id of the last node whose `node_finished` event was appended, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor_node_id: Option<NodeId>,
    #[serde(default)]
    pub retry_count: u32,
    #[serde(default)]
    pub required_capabilities: BTreeSet<String>,
    #[serde(default)]
    pub queue: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancel_requested_at: Option<u64>,
    pub created_at_ms: u64,
    pub updated_at_ms: u64,
}

impl Job {
    pub fn new(config: JobConfig, clock: &impl Clock) -> Self {
        Self::new_with_epoch_ms(config, clock.epoch_ms())
    }

    /// Create a job with an explicit epoch_ms (for event replay).
    pub fn new_with_epoch_ms(config: JobConfig, epoch_ms: u64) -> Self {
        Self {
            id: config.id,
            tenant_id: config.tenant_id,
            agent_id: config.agent_id,
            goal: config.goal,
            status: JobStatus::Pending,
            cursor_node_id: None,
            retry_count: 0,
            required_capabilities: config.required_capabilities,
            queue: config.queue,
            cancel_requested_at: None,
            created_at_ms: epoch_ms,
            updated_at_ms: epoch_ms,
        }
    }

    /// Whether this job's required capabilities are satisfied by a worker's set.
    pub fn capabilities_satisfied_by(&self, offered: &BTreeSet<String>) -> bool {
        self.required_capabilities.is_subset(offered)
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

crate::builder! {
    pub struct JobBuilder => Job {
        into {
        }
        set {
            id: JobId = JobId::new(),
            tenant_id: TenantId = TenantId::new("test-tenant"),
            agent_id: String = "test-agent".to_string(),
            goal: String = "do the thing".to_string(),
            status: JobStatus = JobStatus::Pending,
            required_capabilities: BTreeSet<String> = BTreeSet::new(),
            queue: String = String::new(),
            retry_count: u32 = 0,
            created_at_ms: u64 = 0,
            updated_at_ms: u64 = 0,
        }
        option {
            cursor_node_id: NodeId = None,
            cancel_requested_at: u64 = None,
        }
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
