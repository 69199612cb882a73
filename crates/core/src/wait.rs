// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wait record: embedded in a `job_waiting` event, names the correlation key
//! a parked job is waiting on (§3, §4.6).

use crate::ids::{CorrelationKey, NodeId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaitType {
    Signal,
    Message,
    Timer,
}

crate::simple_display! {
    WaitType {
        Signal => "signal",
        Message => "message",
        Timer => "timer",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitRecord {
    pub node_id: NodeId,
    pub correlation_key: CorrelationKey,
    pub wait_type: WaitType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline_ms: Option<u64>,
}

impl WaitRecord {
    pub fn new(node_id: NodeId, correlation_key: CorrelationKey, wait_type: WaitType) -> Self {
        Self { node_id, correlation_key, wait_type, deadline_ms: None }
    }

    pub fn with_deadline(mut self, deadline_ms: u64) -> Self {
        self.deadline_ms = Some(deadline_ms);
        self
    }

    /// §4.6 contract: the supplied key must equal the recorded key exactly.
    pub fn key_matches(&self, candidate: &CorrelationKey) -> bool {
        &self.correlation_key == candidate
    }

    pub fn is_expired(&self, now_ms: u64) -> bool {
        self.deadline_ms.is_some_and(|d| d < now_ms)
    }
}

#[cfg(test)]
#[path = "wait_tests.rs"]
mod tests;
