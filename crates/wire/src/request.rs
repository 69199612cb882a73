// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Request types sent from the CLI to the worker daemon over the IPC socket.

use std::collections::BTreeSet;

use ajr_core::JobId;
use serde::{Deserialize, Serialize};

/// Commands the CLI issues against a running worker (§6 external interfaces).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum Request {
    /// Health check.
    Ping,

    /// `submit(tenant_id, agent_id, goal, required_capabilities?, queue?) -> job_id`.
    Submit {
        tenant_id: String,
        agent_id: String,
        goal: String,
        #[serde(default)]
        required_capabilities: BTreeSet<String>,
        #[serde(default)]
        queue: String,
    },

    /// `request_cancel(job_id) -> ack`.
    Cancel { job_id: JobId },

    /// `signal(job_id, correlation_key, payload?) -> ack | mismatch | not_waiting`.
    Signal {
        job_id: JobId,
        correlation_key: String,
        #[serde(default)]
        payload: Option<serde_json::Value>,
    },

    /// Fetch a single job's current projection.
    GetJob { job_id: JobId },

    /// Fetch the worker's health snapshot.
    Status,
}

#[cfg(test)]
#[path = "request_tests.rs"]
mod tests;
