// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Agent instance record (§3). Tracks whether an agent is free to receive a
//! new job and which job, if any, currently holds it.

use crate::ids::{AgentInstanceId, JobId, TenantId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentInstanceStatus {
    Idle,
    Running,
    Waiting,
}

crate::simple_display! {
    AgentInstanceStatus {
        Idle => "idle",
        Running => "running",
        Waiting => "waiting",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentInstance {
    pub id: AgentInstanceId,
    pub tenant_id: TenantId,
    pub status: AgentInstanceStatus,
    pub default_session_id: Option<String>,
    pub current_job_id: Option<JobId>,
    pub behavior_id: String,
}

impl AgentInstance {
    pub fn new(tenant_id: TenantId, behavior_id: impl Into<String>) -> Self {
        Self {
            id: AgentInstanceId::new(),
            tenant_id,
            status: AgentInstanceStatus::Idle,
            default_session_id: None,
            current_job_id: None,
            behavior_id: behavior_id.into(),
        }
    }

    pub fn is_free(&self) -> bool {
        self.current_job_id.is_none()
    }

    /// Claim this instance for `job_id`. The caller (Worker) owns enforcing
    /// that the instance was free beforehand.
    pub fn attach(&mut self, job_id: JobId, status: AgentInstanceStatus) {
        self.current_job_id = Some(job_id);
        self.status = status;
    }

    /// Release the instance back to idle, e.g. on a terminal job event.
    pub fn detach(&mut self) {
        self.current_job_id = None;
        self.status = AgentInstanceStatus::Idle;
    }
}

#[cfg(test)]
#[path = "agent_instance_tests.rs"]
mod tests;
