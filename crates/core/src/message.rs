// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Agent inbox message (§3, §4.7). The Inbox Poller turns unconsumed,
//! delivery-eligible messages into jobs.

use crate::ids::{AgentInstanceId, JobId, MessageId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    User,
    Signal,
    Timer,
    Webhook,
    Agent,
}

crate::simple_display! {
    MessageKind {
        User => "user",
        Signal => "signal",
        Timer => "timer",
        Webhook => "webhook",
        Agent => "agent",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub from_agent_id: Option<AgentInstanceId>,
    pub to_agent_id: AgentInstanceId,
    pub channel: String,
    pub kind: MessageKind,
    pub payload: serde_json::Value,
    pub causation_id: Option<MessageId>,
    pub scheduled_at_ms: Option<u64>,
    pub expires_at_ms: Option<u64>,
    pub created_at_ms: u64,
    pub delivered_at_ms: Option<u64>,
    pub consumed_by_job_id: Option<JobId>,
    pub consumed_at_ms: Option<u64>,
}

impl Message {
    pub fn new(
        to_agent_id: AgentInstanceId,
        channel: impl Into<String>,
        kind: MessageKind,
        payload: serde_json::Value,
        created_at_ms: u64,
    ) -> Self {
        Self {
            id: MessageId::new(),
            from_agent_id: None,
            to_agent_id,
            channel: channel.into(),
            kind,
            payload,
            causation_id: None,
            scheduled_at_ms: None,
            expires_at_ms: None,
            created_at_ms,
            delivered_at_ms: None,
            consumed_by_job_id: None,
            consumed_at_ms: None,
        }
    }

    /// §3 invariant: eligible when delivered, or scheduled and due, and not
    /// yet consumed.
    pub fn is_delivery_eligible(&self, now_ms: u64) -> bool {
        if self.consumed_by_job_id.is_some() {
            return false;
        }
        if let Some(expires_at) = self.expires_at_ms {
            if expires_at <= now_ms {
                return false;
            }
        }
        self.delivered_at_ms.is_some() || self.scheduled_at_ms.is_some_and(|s| s <= now_ms)
    }

    pub fn mark_consumed(&mut self, job_id: JobId, now_ms: u64) {
        self.consumed_by_job_id = Some(job_id);
        self.consumed_at_ms = Some(now_ms);
    }
}

#[cfg(test)]
#[path = "message_tests.rs"]
mod tests;
